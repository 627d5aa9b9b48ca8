use convert_content::{backfill, overlay};
use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {}", other),
    }
}

#[test]
fn existing_beats_defaults_and_overlay_beats_everything() {
    let mut record = object(json!({"a": 1}));
    backfill(&mut record, &object(json!({"a": 2, "b": 2})));
    overlay(&mut record, &object(json!({"b": 3, "c": 3})));

    assert_eq!(Value::Object(record), json!({"a": 1, "b": 3, "c": 3}));
}

#[test]
fn layering_preserves_existing_key_order() {
    let mut record = object(json!({"name": "acme-foo", "version": "1.2.3"}));
    backfill(&mut record, &object(json!({"license": "Apache-2.0", "version": "0.1.0"})));
    overlay(&mut record, &object(json!({"name": "acme-bar", "template-url": "file:///t"})));

    let keys: Vec<&str> = record.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["name", "version", "license", "template-url"]);
    assert_eq!(record["name"], json!("acme-bar"));
    assert_eq!(record["version"], json!("1.2.3"));
}

#[test]
fn layering_twice_is_stable() {
    let defaults = object(json!({"license": "Apache-2.0", "dependencies": []}));
    let template = object(json!({"template-ref": "heads/main-0-gabc1234"}));

    let mut once = object(json!({"name": "acme-foo"}));
    backfill(&mut once, &defaults);
    overlay(&mut once, &template);

    let mut twice = once.clone();
    backfill(&mut twice, &defaults);
    overlay(&mut twice, &template);

    assert_eq!(once, twice);
}
