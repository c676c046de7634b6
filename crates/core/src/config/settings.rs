use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Per-run generator settings, read once from the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneratorConfig {
    /// Import path of the package to generate for
    pub package: String,
    /// Prefix that marks an import as local to the workspace
    pub root_prefix: String,
    #[serde(default = "default_include_tests")]
    pub include_tests: bool,
}

fn default_include_tests() -> bool {
    true
}

impl GeneratorConfig {
    /// Build the config from raw flag values.
    ///
    /// `root_prefix` falls back to `package` when absent or empty.
    pub fn new(package: Option<&str>, root_prefix: Option<&str>) -> Result<Self> {
        let package = package
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Error::ConfigError("No package name provided".to_string()))?;

        let root_prefix = root_prefix
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(package)
            .trim_end_matches('/');

        Ok(Self {
            package: package.to_string(),
            root_prefix: root_prefix.to_string(),
            include_tests: true,
        })
    }

    pub fn with_tests(mut self, include_tests: bool) -> Self {
        self.include_tests = include_tests;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_package_is_config_error() {
        let err = GeneratorConfig::new(None, Some("bar")).unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
        assert!(err.to_string().contains("No package name provided"));

        assert!(GeneratorConfig::new(Some(""), None).is_err());
        assert!(GeneratorConfig::new(Some("   "), None).is_err());
    }

    #[test]
    fn test_root_prefix_defaults_to_package() {
        let config = GeneratorConfig::new(Some("example.com/repo/pkg"), None).unwrap();
        assert_eq!(config.root_prefix, "example.com/repo/pkg");
        assert!(config.include_tests);

        let config = GeneratorConfig::new(Some("example.com/repo/pkg"), Some("")).unwrap();
        assert_eq!(config.root_prefix, "example.com/repo/pkg");
    }

    #[test]
    fn test_explicit_root_prefix() {
        let config = GeneratorConfig::new(Some("example.com/repo/pkg"), Some("example.com/repo/"))
            .unwrap()
            .with_tests(false);
        assert_eq!(config.root_prefix, "example.com/repo");
        assert!(!config.include_tests);
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"package": "foo", "root_prefix": "bar"}"#).unwrap();
        assert!(config.include_tests);
    }
}
