//! Templates stored as a local directory

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use git2::{DescribeFormatOptions, DescribeOptions, Repository};
use regex::{Captures, Regex};
use serde_json::{Map, Value, json};
use walkdir::WalkDir;

use convert_fs::{NormalizedPath, ProjectPath, io};
use convert_meta::MetadataOptions;

use super::{RenderedFile, TemplateRenderer};
use crate::Result;
use crate::error::TemplateError;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// A template directory holding a `moduleroot/` tree.
///
/// Files under `moduleroot/` are rendered with `{{ name }}` placeholders
/// substituted. Variables come from the top-level scalars of an optional
/// `config_defaults.yml`, overridden by values set on the template.
/// Placeholders without a value are left as they are.
#[derive(Debug, Clone)]
pub struct DirectoryTemplate {
    source: String,
    root: PathBuf,
    variables: BTreeMap<String, String>,
}

impl DirectoryTemplate {
    /// Open the template at `source`, a directory path or a `file://` URL.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the directory or its `moduleroot/` is
    /// missing, or `config_defaults.yml` is not a YAML mapping.
    pub fn open(source: &str) -> Result<Self> {
        let root = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
        if !root.is_dir() {
            return Err(TemplateError::NotFound { path: root }.into());
        }
        if !root.join(ProjectPath::ModuleRoot).is_dir() {
            return Err(TemplateError::MissingModuleRoot { path: root }.into());
        }

        let defaults_path = root.join(ProjectPath::ConfigDefaults);
        let variables = if defaults_path.is_file() {
            load_defaults(&defaults_path)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(
            source,
            variables = variables.len(),
            "Opened template directory"
        );
        Ok(Self {
            source: source.to_string(),
            root,
            variables,
        })
    }

    /// Set a render variable, replacing any default of the same name.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Set `module_name` and `forge_username` from the module options.
    pub fn with_module(self, options: &MetadataOptions) -> Self {
        let username = options.sanitized_username();
        self.with_variable("module_name", options.module_name.clone())
            .with_variable("forge_username", username)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Replace known placeholders in `text`.
    pub fn substitute(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match self.variables.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    fn render_file(&self, module_root: &Path, path: &Path) -> Result<RenderedFile> {
        let relative = path.strip_prefix(module_root).unwrap_or(path);
        let text = io::read_text(&NormalizedPath::new(path)).map_err(|source| {
            TemplateError::Render {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(RenderedFile {
            path: NormalizedPath::new(relative),
            content: self.substitute(&text),
        })
    }
}

impl TemplateRenderer for DirectoryTemplate {
    fn render(&self) -> Result<Box<dyn Iterator<Item = Result<RenderedFile>> + '_>> {
        let module_root = self.root.join(ProjectPath::ModuleRoot);
        if !module_root.is_dir() {
            return Err(TemplateError::MissingModuleRoot {
                path: self.root.clone(),
            }
            .into());
        }

        let entries = WalkDir::new(&module_root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    Some(self.render_file(&module_root, entry.path()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(TemplateError::from(e).into())),
            });
        Ok(Box::new(entries))
    }

    fn metadata(&self) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert("template-url".to_string(), json!(self.source));
        if let Some(reference) = describe_ref(&self.root) {
            metadata.insert("template-ref".to_string(), json!(reference));
        }
        metadata
    }
}

/// Top-level scalar values of `config_defaults.yml`, as strings.
fn load_defaults(path: &Path) -> Result<BTreeMap<String, String>> {
    let invalid = |message: String| TemplateError::InvalidDefaults {
        path: path.to_path_buf(),
        message,
    };

    let text = io::read_text(&NormalizedPath::new(path)).map_err(|e| invalid(e.to_string()))?;
    let document: serde_yaml::Value =
        serde_yaml::from_str(&text).map_err(|e| invalid(e.to_string()))?;

    let mut variables = BTreeMap::new();
    match document {
        serde_yaml::Value::Null => {}
        serde_yaml::Value::Mapping(mapping) => {
            for (key, value) in mapping {
                let Some(key) = key.as_str() else { continue };
                let value = match value {
                    serde_yaml::Value::String(s) => s,
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                variables.insert(key.to_string(), value);
            }
        }
        _ => return Err(invalid("expected a mapping at the top level".to_string()).into()),
    }
    Ok(variables)
}

/// Equivalent of `git describe --all --long --always` for a template
/// checkout. `None` when the template is not a git repository.
fn describe_ref(root: &Path) -> Option<String> {
    let repo = match Repository::open(root) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::debug!(path = %root.display(), error = %e, "Template is not a git checkout");
            return None;
        }
    };

    let mut options = DescribeOptions::new();
    options.describe_all().show_commit_oid_as_fallback(true);
    let mut format = DescribeFormatOptions::new();
    format.always_use_long_format(true);

    match repo
        .describe(&options)
        .and_then(|describe| describe.format(Some(&format)))
    {
        Ok(reference) => Some(reference),
        Err(e) => {
            tracing::warn!(path = %root.display(), error = %e, "Unable to describe template revision");
            None
        }
    }
}
