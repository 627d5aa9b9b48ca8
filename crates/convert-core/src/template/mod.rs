//! Template sources that produce the desired state of a module
//!
//! A [`TemplateRenderer`] yields the files a converted module should contain
//! plus a metadata overlay identifying the template itself.

mod directory;

pub use directory::DirectoryTemplate;

use serde_json::{Map, Value};

use convert_fs::NormalizedPath;

use crate::Result;

/// A file produced by a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the module root
    pub path: NormalizedPath,
    pub content: String,
}

/// Produces desired file contents for a module.
pub trait TemplateRenderer {
    /// Lazily render every file, in a deterministic order.
    fn render(&self) -> Result<Box<dyn Iterator<Item = Result<RenderedFile>> + '_>>;

    /// Keys layered onto the module metadata unconditionally.
    fn metadata(&self) -> Map<String, Value>;
}
