//! Filesystem layer for module-convert
//!
//! Provides normalized project-relative paths, entry probing, atomic writes
//! and format-agnostic config loading.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ProjectPath;
pub use error::{Error, Result};
pub use io::EntryKind;
pub use path::NormalizedPath;
