//! Module metadata management for module-convert.
//!
//! The metadata record (`metadata.json`) is merged rather than overwritten
//! during a conversion: explicit values in the existing record win over the
//! defaults defined here, and template-supplied values are layered on top.

pub mod defaults;
pub mod error;
pub mod provider;
pub mod record;
pub mod validation;

pub use defaults::{MetadataOptions, default_fields, module_name_from_dir};
pub use error::{Error, Result};
pub use provider::{JsonMetadataProvider, MetadataLoad, MetadataProvider};
pub use record::MetadataRecord;
pub use validation::ValidationError;
