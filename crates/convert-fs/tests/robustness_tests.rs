use assert_fs::prelude::*;
use convert_fs::{EntryKind, NormalizedPath, ProjectPath, io};
use predicates::prelude::*;

#[test]
fn write_atomic_creates_nested_parents() {
    let temp = assert_fs::TempDir::new().unwrap();
    let target = temp.child(ProjectPath::BundleConfig.as_str());

    io::write_text(&NormalizedPath::new(target.path()), "---\n").unwrap();

    target.assert("---\n");
}

#[test]
fn write_fails_when_parent_is_a_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child(".bundle").touch().unwrap();
    let target = temp.child(ProjectPath::BundleConfig.as_str());

    let err = io::write_text(&NormalizedPath::new(target.path()), "---\n").unwrap_err();

    assert!(err.to_string().contains(".bundle"));
    target.assert(predicate::path::missing());
}

#[test]
fn remove_file_reports_whether_anything_was_removed() {
    let temp = assert_fs::TempDir::new().unwrap();
    let lock = temp.child(ProjectPath::GemfileLock.as_str());
    lock.write_str("GEM\n").unwrap();
    let path = NormalizedPath::new(lock.path());

    assert!(io::remove_file(&path).unwrap());
    lock.assert(predicate::path::missing());
    assert!(!io::remove_file(&path).unwrap());
}

#[test]
fn remove_file_refuses_directories() {
    let temp = assert_fs::TempDir::new().unwrap();
    let dir = temp.child("Gemfile.lock");
    dir.create_dir_all().unwrap();

    assert!(io::remove_file(&NormalizedPath::new(dir.path())).is_err());
    dir.assert(predicate::path::is_dir());
}

#[test]
fn probe_under_a_file_is_an_error() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("manifests").touch().unwrap();

    let result = io::probe(&NormalizedPath::new(temp.child("manifests/init.pp").path()));
    assert!(result.is_err());
    assert_ne!(
        io::probe(&NormalizedPath::new(temp.child("manifests").path())).unwrap(),
        EntryKind::Missing
    );
}
