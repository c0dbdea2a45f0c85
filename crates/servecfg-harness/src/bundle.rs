//! The bundle initializer contract and the implementations shipped with the
//! harness.
//!
//! An initializer is the platform-specific routine that checks a model
//! version's on-disk artifacts against its declared configuration. The
//! harness treats it as an opaque capability: success means the artifacts
//! are structurally compatible, failure carries a free-text diagnostic.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use tracing::debug;

use servecfg_config::{ModelConfig, Platform};

/// Platform-specific initialization over a model's version directory.
pub trait BundleInitializer {
    fn initialize(&self, version_path: &Path, config: &ModelConfig) -> Result<()>;
}

/// Closures are initializers; tests pass spies and stubs directly.
impl<F> BundleInitializer for F
where
    F: Fn(&Path, &ModelConfig) -> Result<()>,
{
    fn initialize(&self, version_path: &Path, config: &ModelConfig) -> Result<()> {
        self(version_path, config)
    }
}

// ---------------------------------------------------------------------------
// NoopBundleInit
// ---------------------------------------------------------------------------

/// Accepts every model. Exercises only the normalization and validation
/// stages of the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBundleInit;

impl BundleInitializer for NoopBundleInit {
    fn initialize(&self, _version_path: &Path, _config: &ModelConfig) -> Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ArtifactBundleInit
// ---------------------------------------------------------------------------

/// Structural artifact check: the configured model filename must exist under
/// the version path, as a directory for SavedModel and as a regular file for
/// every other platform. Artifact contents are never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArtifactBundleInit;

impl BundleInitializer for ArtifactBundleInit {
    fn initialize(&self, version_path: &Path, config: &ModelConfig) -> Result<()> {
        let platform = Platform::from_str(&config.platform)
            .with_context(|| format!("model '{}'", config.name))?;

        let artifact = version_path.join(&config.default_model_filename);
        debug!(model = %config.name, artifact = %artifact.display(), "checking artifact");

        if !artifact.exists() {
            bail!(
                "model '{}' is missing artifact {} for platform {}",
                config.name,
                artifact.display(),
                platform
            );
        }
        if platform.artifact_is_dir() != artifact.is_dir() {
            let expected = if platform.artifact_is_dir() { "directory" } else { "file" };
            bail!(
                "model '{}' artifact {} must be a {expected} for platform {}",
                config.name,
                artifact.display(),
                platform
            );
        }
        Ok(())
    }
}
