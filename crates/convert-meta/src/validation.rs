//! Structural checks for metadata records

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Forge names look like `<owner>-<module>` or `<owner>/<module>`.
static FORGE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9]+[-/][a-z][a-z0-9_]*$").expect("forge name pattern is valid")
});

/// An existing metadata record failed structural validation.
///
/// Recoverable: the reconciler regenerates defaults instead of aborting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid metadata in {}: {reason}", path.display())]
pub struct ValidationError {
    pub path: PathBuf,
    pub reason: String,
}

impl ValidationError {
    pub fn new(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Check that a parsed document is usable as a metadata record.
///
/// Returns the reason for rejection, if any.
pub fn validate_document(document: &Value) -> Option<String> {
    let Value::Object(data) = document else {
        return Some("top-level value must be a JSON object".to_string());
    };

    match data.get("name") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) if is_valid_forge_name(name) => None,
        Some(Value::String(name)) => Some(format!(
            "'name' field must be in the form <owner>-<module>, got '{}'",
            name
        )),
        Some(other) => Some(format!("'name' field must be a string, got {}", other)),
    }
}

/// Whether `name` is a well-formed `<owner>-<module>` identifier.
pub fn is_valid_forge_name(name: &str) -> bool {
    FORGE_NAME.is_match(name)
}
