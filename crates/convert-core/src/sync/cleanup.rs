use convert_fs::{NormalizedPath, ProjectPath};

use crate::Result;

/// Files removed after apply when their trigger was modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupRule {
    /// Project-relative path whose modification fires the rule
    pub trigger: NormalizedPath,
    /// Project-relative paths to remove; missing ones are skipped
    pub remove: Vec<NormalizedPath>,
}

impl CleanupRule {
    pub fn new(trigger: impl Into<NormalizedPath>, remove: Vec<NormalizedPath>) -> Self {
        Self {
            trigger: trigger.into(),
            remove,
        }
    }

    /// A modified `Gemfile` invalidates the resolved bundle.
    pub fn bundler() -> Self {
        Self::new(
            ProjectPath::Gemfile.as_str(),
            vec![
                ProjectPath::GemfileLock.as_str().into(),
                ProjectPath::BundleConfig.as_str().into(),
            ],
        )
    }
}

/// Regenerates dependency lock files after the `Gemfile` changed.
pub trait LockRefresher {
    fn refresh(&self, root: &NormalizedPath) -> Result<()>;
}

/// Refresher that leaves lock files alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRefresher;

impl LockRefresher for NoopRefresher {
    fn refresh(&self, root: &NormalizedPath) -> Result<()> {
        tracing::debug!(root = %root, "Lock refresh skipped");
        Ok(())
    }
}
