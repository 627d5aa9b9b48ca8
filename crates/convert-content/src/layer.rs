//! Key-level layering of JSON objects
//!
//! Layering is shallow: a key present in the target is either kept whole
//! (backfill) or replaced whole (overlay). Nested objects are not merged.

use serde_json::{Map, Value};

/// Insert every key of `defaults` that `target` does not already define.
///
/// Existing keys win, even when their value is `null`.
pub fn backfill(target: &mut Map<String, Value>, defaults: &Map<String, Value>) {
    for (key, value) in defaults {
        if !target.contains_key(key) {
            target.insert(key.clone(), value.clone());
        }
    }
}

/// Set every key of `layer` on `target`, replacing existing values.
///
/// Keys already present keep their position in the target's ordering.
pub fn overlay(target: &mut Map<String, Value>, layer: &Map<String, Value>) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}

/// Drop top-level keys whose value is `null`.
pub fn strip_nulls(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    #[test]
    fn backfill_keeps_existing_null() {
        let mut target = object(json!({"data_provider": null}));
        backfill(&mut target, &object(json!({"data_provider": "hiera"})));
        assert_eq!(target["data_provider"], Value::Null);
    }

    #[test]
    fn overlay_replaces_nested_objects_whole() {
        let mut target = object(json!({"requirements": {"a": 1, "b": 2}}));
        overlay(&mut target, &object(json!({"requirements": {"c": 3}})));
        assert_eq!(Value::Object(target), json!({"requirements": {"c": 3}}));
    }

    #[test]
    fn strip_nulls_only_touches_top_level() {
        let map = object(json!({"a": null, "b": {"c": null}}));
        assert_eq!(Value::Object(strip_nulls(&map)), json!({"b": {"c": null}}));
    }
}
