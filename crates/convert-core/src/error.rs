//! Error types for convert-core

use std::path::PathBuf;

use convert_fs::NormalizedPath;

use crate::changeset::OperationKind;

/// Result type for convert-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in convert-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Conflict(#[from] ConflictError),

    #[error(transparent)]
    Apply(#[from] ApplyError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Configuration could not be loaded
    #[error("Invalid configuration at {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: convert_fs::Error,
    },

    /// Regenerating dependency lock files failed
    #[error("Lock refresh failed: {message}")]
    LockRefresh { message: String },

    // Transparent wrappers for underlying crate errors
    /// Metadata error from convert-meta
    #[error(transparent)]
    Meta(#[from] convert_meta::Error),

    /// Filesystem error from convert-fs
    #[error(transparent)]
    Fs(#[from] convert_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A desired file collides with an entry that cannot be reconciled.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Unable to convert {path}; it exists but it is not a regular file")]
    NotAFile { path: NormalizedPath },

    #[error("Unable to convert {path}; it exists but it is not readable: {source}")]
    Unreadable {
        path: NormalizedPath,
        #[source]
        source: convert_fs::Error,
    },
}

impl ReconcileError {
    /// The project-relative path that could not be reconciled.
    pub fn path(&self) -> &NormalizedPath {
        match self {
            Self::NotAFile { path } | Self::Unreadable { path, .. } => path,
        }
    }
}

/// Content was registered for a path that is pending removal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot {requested} {path}: it is already scheduled for removal")]
pub struct ConflictError {
    pub path: NormalizedPath,
    pub requested: OperationKind,
}

/// A single operation failed while applying a change set.
///
/// Operations applied before the failure stay applied; `applied` lists them.
#[derive(Debug, thiserror::Error)]
#[error("Failed to {action} {path}: {source}")]
pub struct ApplyError {
    pub path: NormalizedPath,
    pub action: OperationKind,
    pub applied: Vec<NormalizedPath>,
    #[source]
    pub source: convert_fs::Error,
}

/// The template source could not be opened or rendered.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Template at {path} has no moduleroot directory")]
    MissingModuleRoot { path: PathBuf },

    #[error("Invalid template defaults in {path}: {message}")]
    InvalidDefaults { path: PathBuf, message: String },

    #[error("Failed to render template file {path}: {source}")]
    Render {
        path: PathBuf,
        #[source]
        source: convert_fs::Error,
    },

    #[error("Failed to walk template directory: {0}")]
    Walk(#[from] walkdir::Error),
}
