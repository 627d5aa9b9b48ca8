use convert_fs::{ConfigStore, Error, NormalizedPath};
use rstest::rstest;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct Answers {
    author: String,
    count: i32,
}

#[rstest]
#[case("config.toml", "author = \"jane\"\ncount = 42\n")]
#[case("config.json", r#"{"author": "jane", "count": 42}"#)]
#[case("config.yaml", "author: jane\ncount: 42\n")]
#[case("config.yml", "author: jane\ncount: 42\n")]
fn test_load_detects_format(#[case] name: &str, #[case] content: &str) {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join(name);
    fs::write(&file_path, content).unwrap();

    let config: Answers = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();

    assert_eq!(
        config,
        Answers {
            author: "jane".into(),
            count: 42
        }
    );
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.ini");
    fs::write(&file_path, "author=jane").unwrap();

    let result: Result<Answers, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::UnsupportedFormat { extension }) if extension == "ini"));
}

#[test]
fn test_load_invalid_toml_reports_parse_error() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.toml");
    fs::write(&file_path, "author = [unterminated").unwrap();

    let result: Result<Answers, _> = ConfigStore::new().load(&NormalizedPath::new(&file_path));
    assert!(matches!(result, Err(Error::ConfigParse { format, .. }) if format == "TOML"));
}
