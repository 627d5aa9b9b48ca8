//! Text diffing and structured document layering for module-convert
//!
//! - [`diff`]: unified diffs between the current and desired text of a file
//! - [`layer`]: key-level layering of JSON objects (backfill and overlay)

pub mod diff;
pub mod layer;

pub use diff::{DiffStats, unified_diff};
pub use layer::{backfill, overlay, strip_nulls};
