//! Configuration loading contract shared by the integration binaries

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The layered sources could not be merged or deserialized
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    /// A value the process cannot start without is absent
    #[error("Missing required configuration value: {field}")]
    MissingField { field: String },

    /// A value is present but unusable
    #[error("Invalid configuration value for {field}: {details}")]
    InvalidValue { field: String, details: String },
}

impl ConfigurationError {
    pub fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            details: details.into(),
        }
    }
}

impl From<figment::Error> for ConfigurationError {
    fn from(err: figment::Error) -> Self {
        Self::ParseError {
            details: err.to_string(),
        }
    }
}

/// Layered configuration loading: defaults, then file, then environment
pub trait ConfigLoader<T> {
    /// Load from an optional file path, falling back to the default file name
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError>;

    /// Load from an explicit file path
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError>;

    /// Re-apply environment variables with the given prefix on top of `config`
    fn apply_env_overrides(config: &mut T, prefix: &str) -> Result<(), ConfigurationError>;
}
