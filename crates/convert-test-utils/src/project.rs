//! [`TestProject`] builder for module-convert test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A module directory inside a temporary directory.
///
/// The module directory is named like a forge checkout (`acme-ntp` by
/// default) so module-name derivation has something to work with.
///
/// # Example
///
/// ```rust,no_run
/// use convert_test_utils::TestProject;
///
/// let project = TestProject::new().with_file("Gemfile", "source 'https://rubygems.org'\n");
/// project.assert_file_exists("Gemfile");
/// ```
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty `acme-ntp` module directory.
    pub fn new() -> Self {
        Self::named("acme-ntp")
    }

    /// Create an empty module directory with the given name.
    pub fn named(name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(name);
        fs::create_dir_all(&root).unwrap();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Return the module root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file relative to the module root, creating parents.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        self.write(relative, content);
        self
    }

    /// Write a file relative to the module root, creating parents.
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
    }

    /// Create a directory relative to the module root.
    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.root.join(relative)).unwrap();
    }

    /// Read a file relative to the module root.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative))
            .unwrap_or_else(|e| panic!("TestProject::read: {relative}: {e}"))
    }

    /// Sorted list of every file under the module root, relative and
    /// `/`-separated.
    pub fn files(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.root, &self.root, &mut files);
        files.sort();
        files
    }

    /// Assert that a file exists relative to the module root.
    pub fn assert_file_exists(&self, relative: &str) {
        let path = self.root.join(relative);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert that a file does NOT exist relative to the module root.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let path = self.root.join(relative);
        assert!(
            !path.exists(),
            "Expected file to NOT exist: {}",
            path.display()
        );
    }
}

fn collect_files(base: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(base, &path, out);
        } else {
            let relative = path.strip_prefix(base).unwrap();
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
