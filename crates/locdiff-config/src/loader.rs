//! Loading [`LocdiffConfig`] from TOML

use std::path::Path;

use tracing::debug;

use crate::config::LocdiffConfig;
use crate::error::{ConfigError, ConfigResult};

/// Reads and validates configuration files
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a TOML config file, validating it before returning
    pub fn load_from_file(path: impl AsRef<Path>) -> ConfigResult<LocdiffConfig> {
        let path = path.as_ref();
        debug!("Loading config from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse a TOML document; missing sections fall back to defaults
    pub fn from_toml_str(content: &str) -> ConfigResult<LocdiffConfig> {
        let config: LocdiffConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<LocdiffConfig> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(LocdiffConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ListPairing;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ConfigLoader::from_toml_str("").unwrap();
        assert_eq!(config, LocdiffConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ConfigLoader::from_toml_str(
            r#"
            [diff]
            list_pairing = "best-overlap"
            "#,
        )
        .unwrap();
        assert_eq!(config.diff.list_pairing, ListPairing::BestOverlap);
        assert_eq!(config.diff.min_common_list_items, 2);
        assert_eq!(config.links.canonical_suffix, ".aem.live");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let result = ConfigLoader::from_toml_str("[diff]\nmin_common_list_items = 0\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_malformed_toml() {
        let result = ConfigLoader::from_toml_str("[diff\n");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = ConfigLoader::load_from_file("/nonexistent/locdiff.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/locdiff.toml"));
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = ConfigLoader::load_or_default(None).unwrap();
        assert_eq!(config, LocdiffConfig::default());
    }
}
