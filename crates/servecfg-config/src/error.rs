//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading, normalizing or validating a model
/// configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize model configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("model '{model}' has no configuration file and autofill is disabled")]
    MissingConfigFile { model: String },

    #[error("model '{model}' must specify a platform")]
    PlatformUnspecified { model: String },

    #[error("platform '{platform}' is not a known platform")]
    UnknownPlatform { platform: String },

    #[error("unable to derive platform for model '{model}': {reason}")]
    AutofillFailed { model: String, reason: String },

    #[error("invalid model configuration: {0}")]
    Invalid(String),
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, ConfigError>;
