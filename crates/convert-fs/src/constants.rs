//! Well-known project paths.

use std::path::Path;

/// Files and directories the converter treats specially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectPath {
    /// The module metadata record (`metadata.json`)
    Metadata,
    /// The diff report written before changes are confirmed
    ConvertReport,
    /// The dependency manifest whose change triggers lock cleanup
    Gemfile,
    /// Lock file derived from the dependency manifest
    GemfileLock,
    /// Bundler tool cache config derived from the dependency manifest
    BundleConfig,
    /// Directory inside a template holding the files to render
    ModuleRoot,
    /// Optional render variables shipped with a template
    ConfigDefaults,
}

impl ProjectPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata.json",
            Self::ConvertReport => "convert_report.txt",
            Self::Gemfile => "Gemfile",
            Self::GemfileLock => "Gemfile.lock",
            Self::BundleConfig => ".bundle/config",
            Self::ModuleRoot => "moduleroot",
            Self::ConfigDefaults => "config_defaults.yml",
        }
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ProjectPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_config_is_nested() {
        assert_eq!(ProjectPath::BundleConfig.as_str(), ".bundle/config");
        assert_eq!(ProjectPath::Metadata.to_string(), "metadata.json");
    }
}
