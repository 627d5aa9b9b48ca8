//! Error types for convert-meta

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to convert module metadata; {} exists but it is not a file.", path.display())]
    NotAFile { path: PathBuf },

    #[error("Unable to convert module metadata; {} exists but it is not readable.", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: convert_fs::Error,
    },

    #[error("Failed to serialize metadata: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Filesystem error: {0}")]
    Fs(#[from] convert_fs::Error),
}
