//! Harness error types.

use std::path::PathBuf;
use thiserror::Error;

use servecfg_config::ConfigError;

/// Failure of one stage of the validation pipeline.
///
/// Stage errors never cross the runner boundary as errors — the runner
/// captures their display string as the model's `actual` output, so a golden
/// file may deliberately match a diagnostic.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration normalization failed: {0}")]
    Normalization(#[source] ConfigError),

    #[error("configuration validation failed: {0}")]
    Validation(#[source] ConfigError),

    #[error("bundle initialization failed: {0:#}")]
    Initialization(anyhow::Error),

    #[error("failed to render configuration: {0}")]
    Render(#[source] ConfigError),
}

/// Harness-fatal failures. These abort the whole run instead of being
/// recorded against a single model.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to list test directory {path}: {source}")]
    DirectoryListing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to rewrite configuration {path}: {source}")]
    ConfigRewrite {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("environment variable {var} is not set; cannot resolve the fixture root")]
    FixtureRootUnset { var: &'static str },
}
