//! Command implementations

pub mod convert;

pub use convert::{ConvertArgs, run_convert};
