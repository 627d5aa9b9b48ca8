//! Pending file-level changes for a single conversion run
//!
//! A [`ChangeSet`] holds at most one [`Operation`] per path. Registering a
//! path again replaces the earlier entry instead of duplicating it, except
//! that content may never be registered over a pending removal.

mod operation;

pub use operation::{Operation, OperationKind};

use convert_fs::NormalizedPath;

use crate::error::ConflictError;

/// Operations grouped by category, each in registration order.
#[derive(Debug, Default)]
pub struct Changes<'a> {
    pub added: Vec<&'a Operation>,
    pub modified: Vec<&'a Operation>,
    pub removed: Vec<&'a Operation>,
}

impl<'a> Changes<'a> {
    /// Operations of one category.
    pub fn category(&self, kind: OperationKind) -> &[&'a Operation] {
        match kind {
            OperationKind::Add => &self.added,
            OperationKind::Modify => &self.modified,
            OperationKind::Remove => &self.removed,
        }
    }

    /// Categories in apply order: added, modified, removed.
    pub fn by_category(&self) -> [(OperationKind, &[&'a Operation]); 3] {
        [
            (OperationKind::Add, self.added.as_slice()),
            (OperationKind::Modify, self.modified.as_slice()),
            (OperationKind::Remove, self.removed.as_slice()),
        ]
    }
}

/// The set of pending operations for one run.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    operations: Vec<Operation>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new file.
    ///
    /// Re-adding an added path replaces its content in place; a pending
    /// Modify for the path is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] if the path is scheduled for removal.
    pub fn add_file(
        &mut self,
        path: impl Into<NormalizedPath>,
        content: impl Into<String>,
    ) -> Result<(), ConflictError> {
        let path = path.into();
        let operation = Operation::add(path.clone(), content.into());
        match self.position(&path) {
            None => self.operations.push(operation),
            Some(index) => match self.operations[index].kind() {
                OperationKind::Remove => {
                    return Err(ConflictError {
                        path,
                        requested: OperationKind::Add,
                    });
                }
                OperationKind::Add => self.operations[index] = operation,
                OperationKind::Modify => {
                    self.operations.remove(index);
                    self.operations.push(operation);
                }
            },
        }
        tracing::debug!(path = %path, "Registered add");
        Ok(())
    }

    /// Register new content for an existing file.
    ///
    /// Identical content registers nothing and drops any earlier Modify for
    /// the path. A pending Add or Modify is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError`] if the path is scheduled for removal.
    pub fn modify_file(
        &mut self,
        path: impl Into<NormalizedPath>,
        content: impl Into<String>,
        prior_content: impl Into<String>,
    ) -> Result<(), ConflictError> {
        let path = path.into();
        let content = content.into();
        let prior_content = prior_content.into();
        let existing = self.position(&path);

        if let Some(index) = existing
            && self.operations[index].kind() == OperationKind::Remove
        {
            return Err(ConflictError {
                path,
                requested: OperationKind::Modify,
            });
        }

        if content == prior_content {
            if let Some(index) = existing
                && self.operations[index].kind() == OperationKind::Modify
            {
                self.operations.remove(index);
            }
            return Ok(());
        }

        let operation = Operation::modify(path.clone(), content, prior_content);
        match existing {
            Some(index) if self.operations[index].kind() == OperationKind::Modify => {
                self.operations[index] = operation;
            }
            Some(index) => {
                self.operations.remove(index);
                self.operations.push(operation);
            }
            None => self.operations.push(operation),
        }
        tracing::debug!(path = %path, "Registered modify");
        Ok(())
    }

    /// Schedule a file for removal.
    ///
    /// Removing a path that was only added cancels the add. Removing a path
    /// twice is a no-op.
    pub fn remove_file(&mut self, path: impl Into<NormalizedPath>) {
        let path = path.into();
        match self.position(&path) {
            None => self.operations.push(Operation::remove(path.clone())),
            Some(index) => match self.operations[index].kind() {
                OperationKind::Remove => return,
                OperationKind::Add => {
                    self.operations.remove(index);
                    tracing::debug!(path = %path, "Cancelled pending add");
                    return;
                }
                OperationKind::Modify => {
                    self.operations.remove(index);
                    self.operations.push(Operation::remove(path.clone()));
                }
            },
        }
        tracing::debug!(path = %path, "Registered remove");
    }

    /// Operations grouped by category.
    pub fn changes(&self) -> Changes<'_> {
        let mut changes = Changes::default();
        for operation in &self.operations {
            match operation.kind() {
                OperationKind::Add => changes.added.push(operation),
                OperationKind::Modify => changes.modified.push(operation),
                OperationKind::Remove => changes.removed.push(operation),
            }
        }
        changes
    }

    pub fn has_changes(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Whether `path` is registered in any category.
    pub fn is_changed(&self, path: impl Into<NormalizedPath>) -> bool {
        self.position(&path.into()).is_some()
    }

    pub fn get(&self, path: impl Into<NormalizedPath>) -> Option<&Operation> {
        self.position(&path.into()).map(|index| &self.operations[index])
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// All operations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Fold `other` into this set. For paths present in both, the operation
    /// from `other` wins, removals included.
    pub fn merge(&mut self, other: ChangeSet) {
        for operation in other.operations {
            if let Some(index) = self.position(operation.path()) {
                self.operations.remove(index);
            }
            self.operations.push(operation);
        }
    }

    fn position(&self, path: &NormalizedPath) -> Option<usize> {
        self.operations.iter().position(|op| op.path() == path)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn paths(operations: &[&Operation]) -> Vec<String> {
        operations
            .iter()
            .map(|op| op.path().as_str().to_string())
            .collect()
    }

    #[test]
    fn test_categories_keep_registration_order() {
        let mut changes = ChangeSet::new();
        changes.add_file("b.txt", "b").unwrap();
        changes.modify_file("Gemfile", "new", "old").unwrap();
        changes.add_file("a.txt", "a").unwrap();
        changes.remove_file(".travis.yml");

        let grouped = changes.changes();
        assert_eq!(paths(&grouped.added), vec!["b.txt", "a.txt"]);
        assert_eq!(paths(&grouped.modified), vec!["Gemfile"]);
        assert_eq!(paths(&grouped.removed), vec![".travis.yml"]);
    }

    #[test]
    fn test_add_then_remove_cancels() {
        let mut changes = ChangeSet::new();
        changes.add_file("manifests/init.pp", "class foo {}\n").unwrap();
        changes.remove_file("manifests/init.pp");

        assert!(!changes.has_changes());
        assert!(!changes.is_changed("manifests/init.pp"));
    }

    #[test]
    fn test_add_over_remove_conflicts() {
        let mut changes = ChangeSet::new();
        changes.remove_file("Rakefile");

        let err = changes.add_file("Rakefile", "x").unwrap_err();
        assert_eq!(err.requested, OperationKind::Add);
        assert_eq!(err.path.as_str(), "Rakefile");

        let err = changes.modify_file("Rakefile", "x", "y").unwrap_err();
        assert_eq!(err.requested, OperationKind::Modify);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_identical_modify_is_noop() {
        let mut changes = ChangeSet::new();
        changes.modify_file("README.md", "same", "same").unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_identical_modify_drops_stale_modify() {
        let mut changes = ChangeSet::new();
        changes.modify_file("README.md", "new", "old").unwrap();
        changes.modify_file("README.md", "old", "old").unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_readd_replaces_content_in_place() {
        let mut changes = ChangeSet::new();
        changes.add_file("a", "1").unwrap();
        changes.add_file("b", "2").unwrap();
        changes.add_file("a", "3").unwrap();

        let order: Vec<_> = changes.iter().map(|op| op.path().as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        assert_eq!(changes.get("a").unwrap().content(), Some("3"));
    }

    #[test]
    fn test_modify_replaces_add() {
        let mut changes = ChangeSet::new();
        changes.add_file("a", "1").unwrap();
        changes.modify_file("a", "2", "1").unwrap();

        let op = changes.get("a").unwrap();
        assert_eq!(op.kind(), OperationKind::Modify);
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn test_remove_replaces_modify_and_is_idempotent() {
        let mut changes = ChangeSet::new();
        changes.modify_file("a", "2", "1").unwrap();
        changes.remove_file("a");
        changes.remove_file("a");

        assert_eq!(changes.len(), 1);
        assert_eq!(changes.get("a").unwrap().kind(), OperationKind::Remove);
    }

    #[test]
    fn test_merge_last_writer_wins() {
        let mut left = ChangeSet::new();
        left.add_file("a", "left").unwrap();
        left.remove_file("b");

        let mut right = ChangeSet::new();
        right.add_file("b", "right").unwrap();
        right.modify_file("c", "new", "old").unwrap();

        left.merge(right);

        assert_eq!(left.len(), 3);
        assert_eq!(left.get("b").unwrap().kind(), OperationKind::Add);
        assert_eq!(left.get("b").unwrap().content(), Some("right"));
        assert_eq!(left.get("a").unwrap().content(), Some("left"));
    }

    #[test]
    fn test_paths_are_normalized() {
        let mut changes = ChangeSet::new();
        changes.add_file("./manifests/init.pp", "x").unwrap();
        assert!(changes.is_changed("manifests/init.pp"));
    }
}
