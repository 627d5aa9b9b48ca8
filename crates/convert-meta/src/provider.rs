//! Loading metadata records from disk

use serde_json::{Map, Value};

use convert_fs::{EntryKind, NormalizedPath, io};

use crate::defaults::{MetadataOptions, default_fields};
use crate::validation::ValidationError;
use crate::{Error, MetadataRecord, Result};

/// Outcome of looking for an existing metadata record.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataLoad {
    /// A valid record was read
    Found(MetadataRecord),
    /// Nothing exists at the path
    Missing,
    /// The file was read but is not a usable record
    Invalid(ValidationError),
}

/// Source of metadata records and their defaults.
pub trait MetadataProvider {
    /// Look for a record at `path`.
    ///
    /// A missing file or a malformed record is reported through
    /// [`MetadataLoad`]; an entry that exists but cannot be read as a file is
    /// an error.
    fn load(&self, path: &NormalizedPath) -> Result<MetadataLoad>;

    /// Fields backfilled into records that lack them.
    fn defaults(&self) -> Map<String, Value>;

    /// A brand-new record for a project without usable metadata.
    fn prepare_defaults(&self, options: &MetadataOptions) -> MetadataRecord;
}

/// Provider for `metadata.json` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMetadataProvider;

impl JsonMetadataProvider {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataProvider for JsonMetadataProvider {
    fn load(&self, path: &NormalizedPath) -> Result<MetadataLoad> {
        let kind = io::probe(path).map_err(|source| Error::Unreadable {
            path: path.to_native(),
            source,
        })?;

        match kind {
            EntryKind::Missing => {
                tracing::debug!(path = %path, "No metadata found");
                Ok(MetadataLoad::Missing)
            }
            EntryKind::Directory | EntryKind::Other => Err(Error::NotAFile {
                path: path.to_native(),
            }),
            EntryKind::File => {
                let text = match io::read_text(path) {
                    Ok(text) => text,
                    Err(e) if e.io_kind() == Some(std::io::ErrorKind::InvalidData) => {
                        return Ok(MetadataLoad::Invalid(ValidationError::new(
                            path.to_native(),
                            "file is not valid UTF-8",
                        )));
                    }
                    Err(source) => {
                        return Err(Error::Unreadable {
                            path: path.to_native(),
                            source,
                        });
                    }
                };
                match MetadataRecord::parse(&text) {
                    Ok(record) => Ok(MetadataLoad::Found(record)),
                    Err(reason) => {
                        tracing::warn!(path = %path, %reason, "Existing metadata is invalid");
                        Ok(MetadataLoad::Invalid(ValidationError::new(
                            path.to_native(),
                            reason,
                        )))
                    }
                }
            }
        }
    }

    fn defaults(&self) -> Map<String, Value> {
        default_fields()
    }

    fn prepare_defaults(&self, options: &MetadataOptions) -> MetadataRecord {
        options.prepare()
    }
}
