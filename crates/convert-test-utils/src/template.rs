//! [`TemplateFixture`] builder for template sources.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::git;

/// A template source directory with a `moduleroot/` tree.
pub struct TemplateFixture {
    temp_dir: TempDir,
}

impl Default for TemplateFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateFixture {
    /// Create a template with an empty `moduleroot/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("moduleroot")).unwrap();
        Self { temp_dir }
    }

    /// Template with the files most tests need.
    pub fn basic() -> Self {
        Self::new()
            .with_file("manifests/init.pp", "class {{ module_name }} {\n}\n")
            .with_file(".gitignore", "/pkg/\n/spec/fixtures/\n")
    }

    /// Return the template source directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Template source as a string, suitable for `--template-url`.
    pub fn source(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }

    /// Add a file under `moduleroot/`.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.path().join("moduleroot").join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
        self
    }

    /// Write `config_defaults.yml` next to `moduleroot/`.
    pub fn with_config_defaults(self, yaml: &str) -> Self {
        fs::write(self.path().join("config_defaults.yml"), yaml).unwrap();
        self
    }

    /// Turn the template into a git checkout with one commit.
    pub fn committed(self) -> Self {
        git::commit_all(self.path());
        self
    }
}
