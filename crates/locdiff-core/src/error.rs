//! Diff error types

use locdiff_config::ConfigError;
use thiserror::Error;

/// Diff engine error type
#[derive(Debug, Error)]
pub enum DiffError {
    /// The configured environment suffixes did not form a valid pattern
    #[error("Invalid link pattern: {0}")]
    InvalidLinkPattern(#[from] regex::Error),

    /// Configuration rejected before the diff ran
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Specialized Result type for diff operations
pub type DiffResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Check if this error came from user-supplied configuration
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
