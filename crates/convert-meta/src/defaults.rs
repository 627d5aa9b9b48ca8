//! Default metadata fields and generation of a brand-new record

use std::path::Path;

use serde_json::{Map, Value, json};

use crate::MetadataRecord;

const DEFAULT_VERSION: &str = "0.1.0";
const DEFAULT_LICENSE: &str = "Apache-2.0";
const DEFAULT_USERNAME: &str = "username";

/// Fields every metadata record is expected to carry.
///
/// `null` entries mark keys that belong to the record but have no sensible
/// default; they are dropped when the record is serialized.
pub fn default_fields() -> Map<String, Value> {
    let defaults = json!({
        "name": null,
        "version": DEFAULT_VERSION,
        "author": null,
        "summary": "",
        "license": DEFAULT_LICENSE,
        "source": "",
        "project_page": null,
        "issues_url": null,
        "dependencies": [],
        "data_provider": null,
        "operatingsystem_support": [
            { "operatingsystem": "CentOS", "operatingsystemrelease": ["7", "8"] },
            { "operatingsystem": "OracleLinux", "operatingsystemrelease": ["7"] },
            { "operatingsystem": "RedHat", "operatingsystemrelease": ["7", "8"] },
            { "operatingsystem": "Scientific", "operatingsystemrelease": ["7"] },
            { "operatingsystem": "Debian", "operatingsystemrelease": ["9", "10"] },
            { "operatingsystem": "Ubuntu", "operatingsystemrelease": ["18.04", "20.04"] },
            {
                "operatingsystem": "windows",
                "operatingsystemrelease": ["2012 R2", "2016", "2019", "10"]
            }
        ],
        "requirements": [
            { "name": "puppet", "version_requirement": ">= 6.21.0 < 8.0.0" }
        ]
    });

    match defaults {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Inputs for generating a new record when none usable exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataOptions {
    /// Module name without the owner prefix
    pub module_name: String,
    /// Forge account owning the module; falls back to `username`
    pub forge_username: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub summary: Option<String>,
    pub source: Option<String>,
}

impl MetadataOptions {
    /// Options for the project rooted at `dir`, named after its basename.
    pub fn for_project_dir(dir: &Path) -> Self {
        let dir_name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            module_name: module_name_from_dir(&dir_name),
            ..Self::default()
        }
    }

    /// The forge username reduced to ASCII alphanumerics.
    pub fn sanitized_username(&self) -> String {
        let cleaned: String = self
            .forge_username
            .as_deref()
            .unwrap_or(DEFAULT_USERNAME)
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        if cleaned.is_empty() {
            DEFAULT_USERNAME.to_string()
        } else {
            cleaned
        }
    }

    /// Build a complete record from the defaults and these options.
    pub fn prepare(&self) -> MetadataRecord {
        let username = self.sanitized_username();
        let mut data = Map::new();
        data.insert(
            "name".to_string(),
            json!(format!("{}-{}", username, self.module_name)),
        );
        data.insert("version".to_string(), json!(DEFAULT_VERSION));
        data.insert(
            "author".to_string(),
            json!(self.author.clone().unwrap_or_else(|| username.clone())),
        );
        data.insert(
            "summary".to_string(),
            json!(self.summary.clone().unwrap_or_default()),
        );
        data.insert(
            "license".to_string(),
            json!(self.license.as_deref().unwrap_or(DEFAULT_LICENSE)),
        );
        data.insert(
            "source".to_string(),
            json!(self.source.clone().unwrap_or_default()),
        );

        let mut record = MetadataRecord::new(data);
        record.backfill(&default_fields());
        record
    }
}

/// Derive a module name from a project directory name.
///
/// `puppetlabs-apache` becomes `apache`; names without a `-` are kept whole.
pub fn module_name_from_dir(dir_name: &str) -> String {
    match dir_name.split_once('-') {
        Some((_, module)) => module.to_string(),
        None => dir_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("puppetlabs-apache", "apache")]
    #[case("apache", "apache")]
    #[case("acme-my-module", "my-module")]
    fn module_names(#[case] dir: &str, #[case] expected: &str) {
        assert_eq!(module_name_from_dir(dir), expected);
    }

    #[test]
    fn project_dir_basename_names_the_module() {
        let options = MetadataOptions::for_project_dir(Path::new("/work/acme-ntp"));
        assert_eq!(options.module_name, "ntp");
    }

    #[test]
    fn username_is_sanitized() {
        let options = MetadataOptions {
            forge_username: Some("jane.doe!".into()),
            ..MetadataOptions::default()
        };
        assert_eq!(options.sanitized_username(), "janedoe");
    }

    #[test]
    fn prepare_fills_identity_fields() {
        let options = MetadataOptions {
            module_name: "ntp".into(),
            forge_username: Some("acme".into()),
            ..MetadataOptions::default()
        };
        let record = options.prepare();

        assert_eq!(record.get("name"), Some(&json!("acme-ntp")));
        assert_eq!(record.get("author"), Some(&json!("acme")));
        assert_eq!(record.get("license"), Some(&json!("Apache-2.0")));
        assert_eq!(record.get("dependencies"), Some(&json!([])));
        let first_key = record.as_map().keys().next().map(String::as_str);
        assert_eq!(first_key, Some("name"));
    }
}
