//! End-to-end tests for the module-convert binary.
//!
//! These tests exercise the compiled binary using assert_cmd. Each command
//! gets an empty config directory so user configuration cannot leak in.

use assert_cmd::Command;
use convert_test_utils::{TemplateFixture, TestProject};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

/// A module-convert command running in `project` with isolated config.
fn convert_cmd(project: &TestProject, config_home: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("module-convert"));
    cmd.current_dir(project.root())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("MODULE_CONVERT_TEMPLATE_URL");
    cmd
}

#[test]
fn test_help_lists_flags() {
    let project = TestProject::new();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--noop"))
        .stdout(predicate::str::contains("--template-url"))
        .stdout(predicate::str::contains("--skip-lock-refresh"));
}

#[test]
fn test_missing_template_setting_fails() {
    let project = TestProject::new();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .arg("--noop")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No template configured"));
}

#[test]
fn test_noop_reports_without_changing_files() {
    let project = TestProject::new().with_file(".gitignore", "/pkg/\n");
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .args(["--noop", "--template-url", &template.source()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files to be added"))
        .stdout(predicate::str::contains("manifests/init.pp"))
        .stdout(predicate::str::contains("+/spec/fixtures/"));

    assert_eq!(project.files(), vec![".gitignore"]);
}

#[test]
fn test_noop_wins_over_force() {
    let project = TestProject::new().with_file(".gitignore", "/pkg/\n");
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .args(["--noop", "--force", "--template-url", &template.source()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run, no files were changed."));

    assert_eq!(project.files(), vec![".gitignore"]);
    assert_eq!(project.read(".gitignore"), "/pkg/\n");
}

#[test]
fn test_force_applies_then_reports_no_changes() {
    let project = TestProject::new();
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .args(["--force", "--skip-lock-refresh", "--template-url", &template.source()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Convert completed"))
        .stdout(predicate::str::contains("3 files added."));

    assert_eq!(project.read("manifests/init.pp"), "class ntp {\n}\n");
    let metadata = project.read("metadata.json");
    assert!(metadata.contains("\"name\": \"username-ntp\""));

    convert_cmd(&project, &config_home)
        .args(["--force", "--skip-lock-refresh", "--template-url", &template.source()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No changes required."));
}

#[test]
fn test_config_file_supplies_template_and_username() {
    let project = TestProject::new();
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();
    let config_path = config_home.path().join("convert.toml");
    fs::write(
        &config_path,
        format!(
            "template-url = {:?}\nforge-username = \"acme\"\n",
            template.source()
        ),
    )
    .unwrap();

    convert_cmd(&project, &config_home)
        .args(["--force", "--skip-lock-refresh", "--config"])
        .arg(&config_path)
        .assert()
        .success();

    assert!(project.read("metadata.json").contains("\"name\": \"acme-ntp\""));
}

#[test]
fn test_user_config_is_picked_up() {
    let project = TestProject::new();
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();
    let config_dir = config_home.path().join("module-convert");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        format!("template-url = {:?}\n", template.source()),
    )
    .unwrap();

    convert_cmd(&project, &config_home)
        .arg("--noop")
        .assert()
        .success()
        .stdout(predicate::str::contains("Files to be added"));
}

#[test]
fn test_unknown_template_fails() {
    let project = TestProject::new();
    let config_home = TempDir::new().unwrap();
    let missing = config_home.path().join("no-such-template");

    convert_cmd(&project, &config_home)
        .args(["--noop", "--template-url"])
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template not found"));
}

#[test]
fn test_metadata_directory_fails() {
    let project = TestProject::new();
    project.mkdir("metadata.json");
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .args(["--noop", "--template-url", &template.source()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exists but it is not a file"));
}

#[test]
fn test_without_terminal_confirmation_is_declined() {
    let project = TestProject::new();
    let template = TemplateFixture::basic();
    let config_home = TempDir::new().unwrap();

    convert_cmd(&project, &config_home)
        .args(["--template-url", &template.source()])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("potentially destructive"))
        .stdout(predicate::str::contains("Conversion cancelled."));

    assert!(project.files().is_empty());
}
