//! Diff and link normalization settings

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Minimum number of children two lists must share before they are treated
/// as one edited list rather than a deletion plus an addition.
pub const DEFAULT_MIN_COMMON_LIST_ITEMS: usize = 2;

/// Suffix every environment hostname is rewritten to.
pub const DEFAULT_CANONICAL_SUFFIX: &str = ".aem.live";

/// Preview and legacy hostname suffixes rewritten to the canonical suffix.
pub const DEFAULT_ENVIRONMENT_SUFFIXES: &[&str] = &[".hlx.page", ".hlx.live", ".aem.page"];

/// Top-level configuration for the regional diff
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocdiffConfig {
    /// Sequence diff and list reconciliation settings
    #[serde(default)]
    pub diff: DiffConfig,
    /// Link normalization settings
    #[serde(default)]
    pub links: LinkConfig,
}

impl LocdiffConfig {
    /// Check every section for out-of-range values
    pub fn validate(&self) -> ConfigResult<()> {
        self.diff.validate()?;
        self.links.validate()
    }
}

/// How deleted lists are matched against added lists during reconciliation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListPairing {
    /// First qualifying pair in document order wins, no backtracking
    #[default]
    Greedy,
    /// Each added list takes the unconsumed deleted list with the most shared children
    BestOverlap,
}

/// Sequence diff settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Shared children required before two lists are merged
    #[serde(default = "default_min_common_list_items")]
    pub min_common_list_items: usize,

    /// List pairing strategy
    #[serde(default)]
    pub list_pairing: ListPairing,

    /// Run list reconciliation after the sequence diff
    #[serde(default = "default_true")]
    pub reconcile_lists: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            min_common_list_items: DEFAULT_MIN_COMMON_LIST_ITEMS,
            list_pairing: ListPairing::default(),
            reconcile_lists: true,
        }
    }
}

impl DiffConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.min_common_list_items == 0 {
            return Err(ConfigError::invalid_value(
                "diff.min_common_list_items",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Link normalization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Hostname suffixes rewritten to `canonical_suffix`
    #[serde(default = "default_environment_suffixes")]
    pub environment_suffixes: Vec<String>,

    /// Hostname suffix links are normalized to
    #[serde(default = "default_canonical_suffix")]
    pub canonical_suffix: String,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            environment_suffixes: default_environment_suffixes(),
            canonical_suffix: default_canonical_suffix(),
        }
    }
}

impl LinkConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.canonical_suffix.starts_with('.') {
            return Err(ConfigError::invalid_value(
                "links.canonical_suffix",
                format!("'{}' must start with '.'", self.canonical_suffix),
            ));
        }
        if let Some(bad) = self
            .environment_suffixes
            .iter()
            .find(|suffix| !suffix.starts_with('.'))
        {
            return Err(ConfigError::invalid_value(
                "links.environment_suffixes",
                format!("'{}' must start with '.'", bad),
            ));
        }
        Ok(())
    }

    /// Every suffix a link may carry to be considered for rewriting,
    /// canonical suffix included
    pub fn recognized_suffixes(&self) -> impl Iterator<Item = &str> {
        self.environment_suffixes
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.canonical_suffix.as_str()))
    }
}

fn default_min_common_list_items() -> usize {
    DEFAULT_MIN_COMMON_LIST_ITEMS
}

fn default_true() -> bool {
    true
}

fn default_environment_suffixes() -> Vec<String> {
    DEFAULT_ENVIRONMENT_SUFFIXES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_canonical_suffix() -> String {
    DEFAULT_CANONICAL_SUFFIX.to_string()
}
