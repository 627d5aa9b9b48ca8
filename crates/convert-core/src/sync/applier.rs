use convert_fs::{NormalizedPath, io};

use crate::changeset::{ChangeSet, Operation, OperationKind};
use crate::error::ApplyError;

use super::cleanup::CleanupRule;

/// What an apply actually touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub added: Vec<NormalizedPath>,
    pub modified: Vec<NormalizedPath>,
    /// Removals of files that existed
    pub removed: Vec<NormalizedPath>,
    /// Files removed by cleanup rules
    pub cleaned: Vec<NormalizedPath>,
}

impl ApplyReport {
    /// Every path written or removed, cleanup included, in apply order.
    pub fn applied(&self) -> Vec<NormalizedPath> {
        self.added
            .iter()
            .chain(&self.modified)
            .chain(&self.removed)
            .chain(&self.cleaned)
            .cloned()
            .collect()
    }

    fn record(&mut self, kind: OperationKind, path: NormalizedPath) {
        match kind {
            OperationKind::Add => self.added.push(path),
            OperationKind::Modify => self.modified.push(path),
            OperationKind::Remove => self.removed.push(path),
        }
    }
}

/// Writes a change set into the project directory.
///
/// Adds are applied first, then modifies, then removes. The first failure
/// stops the run; operations already applied are not rolled back. Each file
/// is written atomically.
pub struct SyncApplier {
    root: NormalizedPath,
    cleanup: Vec<CleanupRule>,
}

impl SyncApplier {
    /// Applier for `root` with the bundler cleanup rule.
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            cleanup: vec![CleanupRule::bundler()],
        }
    }

    /// Replace the post-apply cleanup rules.
    pub fn with_cleanup_rules(mut self, rules: Vec<CleanupRule>) -> Self {
        self.cleanup = rules;
        self
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    /// Apply every operation in `changes`, then the cleanup rules.
    ///
    /// # Errors
    ///
    /// Returns an [`ApplyError`] naming the failed operation and listing the
    /// paths that were applied before it.
    pub fn apply(&self, changes: &ChangeSet) -> Result<ApplyReport, ApplyError> {
        let mut report = ApplyReport::default();
        let grouped = changes.changes();

        for (kind, operations) in grouped.by_category() {
            for operation in operations {
                if self.apply_operation(operation, &report)? {
                    report.record(kind, operation.path().clone());
                }
            }
        }

        for rule in &self.cleanup {
            if !grouped.modified.iter().any(|op| op.path() == &rule.trigger) {
                continue;
            }
            tracing::debug!(trigger = %rule.trigger, "Running cleanup rule");
            for target in &rule.remove {
                let full_path = self.root.join(target.as_str());
                match io::remove_file(&full_path) {
                    Ok(true) => report.cleaned.push(target.clone()),
                    Ok(false) => {}
                    Err(source) => {
                        return Err(ApplyError {
                            path: target.clone(),
                            action: OperationKind::Remove,
                            applied: report.applied(),
                            source,
                        });
                    }
                }
            }
        }

        tracing::info!(
            added = report.added.len(),
            modified = report.modified.len(),
            removed = report.removed.len(),
            cleaned = report.cleaned.len(),
            "Change set applied"
        );
        Ok(report)
    }

    /// Returns whether anything was touched on disk.
    fn apply_operation(
        &self,
        operation: &Operation,
        report: &ApplyReport,
    ) -> Result<bool, ApplyError> {
        let full_path = self.root.join(operation.path().as_str());
        let result = match operation.kind() {
            OperationKind::Add | OperationKind::Modify => {
                let content = operation.content().unwrap_or_default();
                io::write_text(&full_path, content).map(|()| true)
            }
            OperationKind::Remove => io::remove_file(&full_path),
        };

        result.map_err(|source| {
            tracing::warn!(path = %operation.path(), action = %operation.kind(), "Apply failed");
            ApplyError {
                path: operation.path().clone(),
                action: operation.kind(),
                applied: report.applied(),
                source,
            }
        })
    }
}
