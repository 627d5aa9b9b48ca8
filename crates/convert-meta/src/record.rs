//! The metadata record

use serde_json::{Map, Value};

use crate::Result;
use crate::validation::validate_document;

/// A module metadata document.
///
/// Key order is preserved from the source document so that re-serializing
/// an unchanged record reproduces the same text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    data: Map<String, Value>,
}

impl MetadataRecord {
    /// Wrap an existing key/value map.
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Parse and validate a record from JSON text.
    ///
    /// The error is a human-readable rejection reason.
    pub fn parse(text: &str) -> std::result::Result<Self, String> {
        let document: Value =
            serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
        if let Some(reason) = validate_document(&document) {
            return Err(reason);
        }
        match document {
            Value::Object(data) => Ok(Self { data }),
            _ => Err("top-level value must be a JSON object".to_string()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Add default fields the record does not define yet.
    pub fn backfill(&mut self, defaults: &Map<String, Value>) {
        convert_content::backfill(&mut self.data, defaults);
    }

    /// Apply `values` on top of the record, replacing existing keys.
    pub fn update(&mut self, values: &Map<String, Value>) {
        convert_content::overlay(&mut self.data, values);
    }

    /// Serialize as pretty-printed JSON with a trailing newline.
    ///
    /// Top-level `null` values are omitted.
    pub fn to_json(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(&convert_content::strip_nulls(&self.data))?;
        text.push('\n');
        Ok(text)
    }
}

impl From<Map<String, Value>> for MetadataRecord {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_malformed_json() {
        let reason = MetadataRecord::parse("{\"name\": ").unwrap_err();
        assert!(reason.starts_with("invalid JSON"));
    }

    #[test]
    fn to_json_drops_nulls_and_ends_with_newline() {
        let record = MetadataRecord::parse(r#"{"name": "acme-foo", "issues_url": null}"#).unwrap();
        assert_eq!(record.to_json().unwrap(), "{\n  \"name\": \"acme-foo\"\n}\n");
    }

    #[test]
    fn serialization_round_trips_through_parse() {
        let text = "{\n  \"version\": \"1.0.0\",\n  \"name\": \"acme-foo\"\n}\n";
        let record = MetadataRecord::parse(text).unwrap();
        assert_eq!(record.to_json().unwrap(), text);
    }

    #[test]
    fn update_overrides_existing_keys() {
        let mut record = MetadataRecord::parse(r#"{"template-ref": "old"}"#).unwrap();
        let Value::Object(layer) = json!({"template-ref": "new"}) else {
            unreachable!()
        };
        record.update(&layer);
        assert_eq!(record.get("template-ref"), Some(&json!("new")));
    }
}
