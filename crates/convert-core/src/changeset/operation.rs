use std::cell::OnceCell;
use std::fmt;

use convert_fs::NormalizedPath;

/// Category of a pending operation, in apply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    Add,
    Modify,
    Remove,
}

impl OperationKind {
    /// Past-tense category name used in reports.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Add => "added",
            Self::Modify => "modified",
            Self::Remove => "removed",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Add => "add",
            Self::Modify => "modify",
            Self::Remove => "remove",
        };
        f.write_str(verb)
    }
}

/// A pending file-level action.
#[derive(Debug, Clone)]
pub struct Operation {
    path: NormalizedPath,
    kind: OperationKind,
    content: Option<String>,
    prior_content: Option<String>,
    diff: OnceCell<String>,
}

impl Operation {
    pub(crate) fn add(path: NormalizedPath, content: String) -> Self {
        Self {
            path,
            kind: OperationKind::Add,
            content: Some(content),
            prior_content: None,
            diff: OnceCell::new(),
        }
    }

    pub(crate) fn modify(path: NormalizedPath, content: String, prior_content: String) -> Self {
        Self {
            path,
            kind: OperationKind::Modify,
            content: Some(content),
            prior_content: Some(prior_content),
            diff: OnceCell::new(),
        }
    }

    pub(crate) fn remove(path: NormalizedPath) -> Self {
        Self {
            path,
            kind: OperationKind::Remove,
            content: None,
            prior_content: None,
            diff: OnceCell::new(),
        }
    }

    /// Project-relative path.
    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Full new content (Add and Modify).
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Content on disk at reconciliation time (Modify only).
    pub fn prior_content(&self) -> Option<&str> {
        self.prior_content.as_deref()
    }

    /// Unified diff from the prior content, computed on first access.
    ///
    /// `None` for anything but a Modify.
    pub fn diff(&self) -> Option<&str> {
        let (Some(prior), Some(content)) = (&self.prior_content, &self.content) else {
            return None;
        };
        let diff = self
            .diff
            .get_or_init(|| convert_content::unified_diff(self.path.as_str(), prior, content));
        Some(diff.as_str())
    }
}
