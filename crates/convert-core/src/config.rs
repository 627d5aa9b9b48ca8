//! User configuration for conversions
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults
//! 2. User config (`<config_dir>/module-convert/config.toml`) or an explicit
//!    file given on the command line
//! 3. Command-line flags, applied with [`ConvertConfig::overlay`]

use std::path::{Path, PathBuf};

use serde::Deserialize;

use convert_fs::{ConfigStore, NormalizedPath};
use convert_meta::MetadataOptions;

use crate::{Error, Result};

/// Directory under the platform config dir holding user configuration.
pub const CONFIG_DIR_NAME: &str = "module-convert";

/// File name of the user configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings that may come from a config file or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Template source directory or `file://` URL
    pub template_url: Option<String>,
    pub forge_username: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub source: Option<String>,
}

impl ConvertConfig {
    /// Load an explicit config file. TOML, JSON and YAML are accepted.
    ///
    /// # Errors
    ///
    /// Unlike the user config, an explicit file must exist and parse.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        ConfigStore::new()
            .load(path)
            .map_err(|source| Error::Config {
                path: path.to_native(),
                source,
            })
    }

    /// Load `config.toml` from `dir`, or defaults if there is none.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!(?path, "No user config found, using defaults");
            return Ok(Self::default());
        }
        tracing::debug!(?path, "Loading user config");
        Self::load(&NormalizedPath::new(path))
    }

    /// Load the user config from the platform config directory.
    pub fn load_user() -> Result<Self> {
        match user_config_dir() {
            Some(dir) => Self::load_from_dir(&dir),
            None => Ok(Self::default()),
        }
    }

    /// Take every value set in `overrides`, keeping ours elsewhere.
    pub fn overlay(self, overrides: ConvertConfig) -> Self {
        Self {
            template_url: overrides.template_url.or(self.template_url),
            forge_username: overrides.forge_username.or(self.forge_username),
            author: overrides.author.or(self.author),
            license: overrides.license.or(self.license),
            source: overrides.source.or(self.source),
        }
    }

    /// Options for generating metadata in the project at `project_dir`.
    pub fn metadata_options(&self, project_dir: &Path) -> MetadataOptions {
        MetadataOptions {
            forge_username: self.forge_username.clone(),
            author: self.author.clone(),
            license: self.license.clone(),
            source: self.source.clone(),
            ..MetadataOptions::for_project_dir(project_dir)
        }
    }
}

/// `<config_dir>/module-convert`, if the platform has a config dir.
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_from_dir_returns_defaults_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = ConvertConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config, ConvertConfig::default());
    }

    #[test]
    fn load_from_dir_reads_kebab_case_keys() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "template-url = \"/srv/templates\"\nforge-username = \"acme\"\n",
        )
        .unwrap();

        let config = ConvertConfig::load_from_dir(temp.path()).unwrap();
        assert_eq!(config.template_url.as_deref(), Some("/srv/templates"));
        assert_eq!(config.forge_username.as_deref(), Some("acme"));
        assert_eq!(config.author, None);
    }

    #[test]
    fn overlay_prefers_set_values() {
        let base = ConvertConfig {
            template_url: Some("base".into()),
            author: Some("Base Author".into()),
            ..Default::default()
        };
        let flags = ConvertConfig {
            template_url: Some("flag".into()),
            ..Default::default()
        };

        let merged = base.overlay(flags);
        assert_eq!(merged.template_url.as_deref(), Some("flag"));
        assert_eq!(merged.author.as_deref(), Some("Base Author"));
    }

    #[test]
    fn metadata_options_use_project_dir_name() {
        let config = ConvertConfig {
            forge_username: Some("acme".into()),
            ..Default::default()
        };
        let options = config.metadata_options(Path::new("/work/puppetlabs-apache"));
        assert_eq!(options.module_name, "apache");
        assert_eq!(options.forge_username.as_deref(), Some("acme"));
    }
}
