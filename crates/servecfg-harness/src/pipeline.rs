//! The configuration validation pipeline.
//!
//! Chains three fallible stages — normalize, validate, initialize — over one
//! model directory and renders the surviving configuration to its canonical
//! textual form. The first failing stage aborts the pipeline.

use std::path::Path;

use tracing::debug;

use servecfg_config::{ModelConfig, PlatformRegistry, normalize, validate};

use crate::bundle::BundleInitializer;
use crate::error::PipelineError;

/// The version directory exercised by golden tests. Fixed, not configurable.
const GOLDEN_TEST_VERSION: &str = "1";

/// Normalize, validate and initialize the model at `model_path`, returning
/// the rendered configuration.
///
/// The platform registry is rebuilt on every call; this runs only in test
/// contexts, so correctness wins over caching. The initializer is invoked
/// against the model's `1/` version directory and only after normalization
/// and validation have both succeeded.
pub fn validate_init(
    model_path: &Path,
    autofill: bool,
    initializer: &dyn BundleInitializer,
) -> Result<String, PipelineError> {
    let registry = PlatformRegistry::with_defaults();

    let config: ModelConfig =
        normalize(model_path, &registry, autofill).map_err(PipelineError::Normalization)?;
    debug!(model = %config.name, platform = %config.platform, "normalized");

    validate(&config, "").map_err(PipelineError::Validation)?;

    let version_path = model_path.join(GOLDEN_TEST_VERSION);
    initializer
        .initialize(&version_path, &config)
        .map_err(PipelineError::Initialization)?;

    config.render().map_err(PipelineError::Render)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::NoopBundleInit;
    use std::fs;
    use tempfile::TempDir;

    const VALID_CONFIG: &str = "\
platform: custom
input:
  - name: IN
    data_type: fp32
    dims: [4]
output:
  - name: OUT
    data_type: fp32
    dims: [4]
";

    fn valid_model_dir(base: &TempDir) -> std::path::PathBuf {
        let dir = base.path().join("pipeline_model");
        fs::create_dir_all(dir.join("1")).unwrap();
        fs::write(dir.join("config.yaml"), VALID_CONFIG).unwrap();
        dir
    }

    #[test]
    fn renders_on_success() {
        let base = TempDir::new().unwrap();
        let dir = valid_model_dir(&base);
        let rendered = validate_init(&dir, false, &NoopBundleInit).unwrap();
        assert!(rendered.starts_with("name: pipeline_model"), "got: {rendered}");
        assert!(rendered.contains("platform: custom"));
    }

    #[test]
    fn initializer_receives_version_one_path() {
        let base = TempDir::new().unwrap();
        let dir = valid_model_dir(&base);
        let expected_version = dir.join("1");
        let init = move |version_path: &Path, _: &ModelConfig| -> anyhow::Result<()> {
            assert_eq!(version_path, expected_version);
            Ok(())
        };
        validate_init(&dir, false, &init).unwrap();
    }

    #[test]
    fn normalization_failure_is_reported() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("no_config");
        fs::create_dir_all(dir.join("1")).unwrap();
        let err = validate_init(&dir, false, &NoopBundleInit).unwrap_err();
        assert!(matches!(err, PipelineError::Normalization(_)));
        assert!(err.to_string().contains("normalization failed"));
    }

    #[test]
    fn validation_failure_is_reported() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("no_signature");
        fs::create_dir_all(dir.join("1")).unwrap();
        fs::write(dir.join("config.yaml"), "platform: custom\n").unwrap();
        let err = validate_init(&dir, false, &NoopBundleInit).unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }

    #[test]
    fn initializer_failure_is_reported() {
        let base = TempDir::new().unwrap();
        let dir = valid_model_dir(&base);
        let init =
            |_: &Path, _: &ModelConfig| -> anyhow::Result<()> { anyhow::bail!("artifact corrupt") };
        let err = validate_init(&dir, false, &init).unwrap_err();
        assert!(matches!(err, PipelineError::Initialization(_)));
        assert!(err.to_string().contains("artifact corrupt"));
    }
}
