//! Regenerating `Gemfile.lock` with bundler

use std::process::Command;

use convert_core::{Error, LockRefresher};
use convert_fs::NormalizedPath;

/// Runs `bundle lock` in the module root.
pub struct BundleRefresher {
    program: String,
}

impl BundleRefresher {
    pub fn new() -> Self {
        Self {
            program: "bundle".to_string(),
        }
    }
}

impl Default for BundleRefresher {
    fn default() -> Self {
        Self::new()
    }
}

impl LockRefresher for BundleRefresher {
    fn refresh(&self, root: &NormalizedPath) -> convert_core::Result<()> {
        tracing::debug!(root = %root, program = %self.program, "Running bundle lock");
        let output = Command::new(&self.program)
            .arg("lock")
            .current_dir(root.to_native())
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::LockRefresh {
                message: format!(
                    "`{} lock` exited with {}: {}",
                    self.program,
                    output.status,
                    stderr.trim()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_program_is_an_error() {
        let temp = TempDir::new().unwrap();
        let refresher = BundleRefresher {
            program: "definitely-not-a-bundler-binary".to_string(),
        };
        assert!(refresher.refresh(&NormalizedPath::new(temp.path())).is_err());
    }
}
