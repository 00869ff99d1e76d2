//! Configuration for catalog analysis.
//!
//! Every setting has a default, so a configuration file only needs the keys
//! it changes:
//!
//! ```yaml
//! catalog-extension: .pragmas
//! max-search-depth: 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Default extension of the pragma catalog file
pub const DEFAULT_CATALOG_EXTENSION: &str = ".db";

/// Default extension of the HTML visualization
pub const DEFAULT_HTML_EXTENSION: &str = ".html";

/// Default extension of the compact details report
pub const DEFAULT_DETAILS_EXTENSION: &str = ".data";

/// Settings that control where a catalog is read from, where its reports go
/// and how far the cycle search may reach.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Appended to the catalog base path to locate the pragma file
    pub catalog_extension: String,

    /// Appended to the catalog base path for the HTML visualization
    pub html_extension: String,

    /// Appended to the catalog base path for the compact details report
    pub details_extension: String,

    /// Maximum trace length of the cycle search.
    ///
    /// `None` searches without limit. Cycles longer than the budget are not
    /// found and the analysis is flagged as truncated.
    pub max_search_depth: Option<usize>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            catalog_extension: DEFAULT_CATALOG_EXTENSION.to_string(),
            html_extension: DEFAULT_HTML_EXTENSION.to_string(),
            details_extension: DEFAULT_DETAILS_EXTENSION.to_string(),
            max_search_depth: None,
        }
    }
}

impl AnalysisConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Config`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for malformed YAML or invalid values.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configured values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an empty extension or a zero search depth.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("catalog-extension", &self.catalog_extension),
            ("html-extension", &self.html_extension),
            ("details-extension", &self.details_extension),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{key} must not be empty")));
            }
        }

        if self.max_search_depth == Some(0) {
            return Err(Error::Config(
                "max-search-depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_catalog_conventions() {
        let config = AnalysisConfig::default();

        assert_eq!(config.catalog_extension, ".db");
        assert_eq!(config.html_extension, ".html");
        assert_eq!(config.details_extension, ".data");
        assert_eq!(config.max_search_depth, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() {
        let config = AnalysisConfig::from_yaml("max-search-depth: 12\n").unwrap();

        assert_eq!(config.max_search_depth, Some(12));
        assert_eq!(config.catalog_extension, ".db");
    }

    #[test]
    fn yaml_overrides_extensions() {
        let config =
            AnalysisConfig::from_yaml("catalog-extension: .pragmas\nhtml-extension: .htm\n")
                .unwrap();

        assert_eq!(config.catalog_extension, ".pragmas");
        assert_eq!(config.html_extension, ".htm");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = AnalysisConfig::from_yaml("catalog-extention: .db\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn empty_extension_is_rejected() {
        let result = AnalysisConfig::from_yaml("details-extension: ''\n");

        let Err(Error::Config(message)) = result else {
            panic!("expected config error, got {result:?}");
        };
        assert!(message.contains("details-extension"));
    }

    #[test]
    fn zero_search_depth_is_rejected() {
        let result = AnalysisConfig::from_yaml("max-search-depth: 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_reports_missing_file_as_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = AnalysisConfig::load(&dir.path().join("absent.yaml"));

        assert!(matches!(result, Err(Error::Io(_))));
    }
}
