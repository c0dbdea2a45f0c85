//! Schema validation for normalized model configurations.
//!
//! Validation accepts or rejects; it never mutates. The first violated rule
//! is reported.

use std::collections::HashSet;
use std::str::FromStr;

use crate::config::{ModelConfig, ModelIo, VersionPolicy};
use crate::error::{ConfigError, Result};
use crate::platform::Platform;

/// Validate `config` against the platform schema rules.
///
/// `model_name_hint` only feeds diagnostics when the configuration itself
/// carries no name.
pub fn validate(config: &ModelConfig, model_name_hint: &str) -> Result<()> {
    if config.name.is_empty() {
        let hint = if model_name_hint.is_empty() { "<unnamed>" } else { model_name_hint };
        return Err(ConfigError::Invalid(format!("model '{hint}' must specify a name")));
    }
    let name = &config.name;

    if config.platform.is_empty() {
        return Err(ConfigError::Invalid(format!("model '{name}' must specify a platform")));
    }
    Platform::from_str(&config.platform)?;

    if config.max_batch_size < 1 {
        return Err(ConfigError::Invalid(format!(
            "model '{name}' must specify max_batch_size >= 1"
        )));
    }

    match &config.version_policy {
        VersionPolicy::Latest { num_versions } if *num_versions < 1 => {
            return Err(ConfigError::Invalid(format!(
                "model '{name}' version policy 'latest' must keep at least one version"
            )));
        }
        VersionPolicy::Specific { versions } if versions.is_empty() => {
            return Err(ConfigError::Invalid(format!(
                "model '{name}' version policy 'specific' must list at least one version"
            )));
        }
        _ => {}
    }

    if config.input.is_empty() {
        return Err(ConfigError::Invalid(format!("model '{name}' must specify at least one input")));
    }
    if config.output.is_empty() {
        return Err(ConfigError::Invalid(format!(
            "model '{name}' must specify at least one output"
        )));
    }

    validate_ios(name, "input", &config.input)?;
    validate_ios(name, "output", &config.output)?;

    Ok(())
}

/// Check one side of the signature: entry shape rules plus name uniqueness.
fn validate_ios(model: &str, kind: &str, entries: &[ModelIo]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(entries.len());
    for entry in entries {
        if entry.name.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "model '{model}' has an unnamed {kind}"
            )));
        }
        if entry.dims.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "model '{model}' {kind} '{}' must specify dims",
                entry.name
            )));
        }
        if let Some(dim) = entry.dims.iter().find(|&&dim| dim < 1 && dim != -1) {
            return Err(ConfigError::Invalid(format!(
                "model '{model}' {kind} '{}' has invalid dim {dim}; dims must be positive or -1",
                entry.name
            )));
        }
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "model '{model}' has duplicate {kind} name '{}'",
                entry.name
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataType;

    fn io(name: &str, dims: &[i64]) -> ModelIo {
        ModelIo { name: name.to_string(), data_type: DataType::Fp32, dims: dims.to_vec() }
    }

    fn valid_config() -> ModelConfig {
        ModelConfig {
            name: "m".to_string(),
            platform: "custom".to_string(),
            max_batch_size: 1,
            default_model_filename: "libcustom.so".to_string(),
            input: vec![io("IN", &[4])],
            output: vec![io("OUT", &[4])],
            ..ModelConfig::default()
        }
    }

    #[test]
    fn accepts_valid_config() {
        assert!(validate(&valid_config(), "").is_ok());
    }

    #[test]
    fn rejects_empty_name_with_hint_in_diagnostic() {
        let mut config = valid_config();
        config.name.clear();
        let err = validate(&config, "fixture_model").unwrap_err();
        assert!(err.to_string().contains("fixture_model"));
    }

    #[test]
    fn rejects_empty_platform() {
        let mut config = valid_config();
        config.platform.clear();
        assert!(validate(&config, "").is_err());
    }

    #[test]
    fn rejects_unknown_platform() {
        let mut config = valid_config();
        config.platform = "openvino".to_string();
        let err = validate(&config, "").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPlatform { .. }));
    }

    #[test]
    fn rejects_zero_max_batch_size() {
        let mut config = valid_config();
        config.max_batch_size = 0;
        assert!(validate(&config, "").is_err());
    }

    #[test]
    fn rejects_missing_inputs_and_outputs() {
        let mut config = valid_config();
        config.input.clear();
        assert!(validate(&config, "").is_err());

        let mut config = valid_config();
        config.output.clear();
        assert!(validate(&config, "").is_err());
    }

    #[test]
    fn rejects_empty_dims() {
        let mut config = valid_config();
        config.input[0].dims.clear();
        assert!(validate(&config, "").is_err());
    }

    #[test]
    fn rejects_zero_dim_but_accepts_wildcard() {
        let mut config = valid_config();
        config.input[0].dims = vec![0];
        assert!(validate(&config, "").is_err());

        config.input[0].dims = vec![-1, 8];
        assert!(validate(&config, "").is_ok());
    }

    #[test]
    fn rejects_duplicate_io_names() {
        let mut config = valid_config();
        config.output.push(io("OUT", &[2]));
        let err = validate(&config, "").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn rejects_degenerate_version_policies() {
        let mut config = valid_config();
        config.version_policy = VersionPolicy::Latest { num_versions: 0 };
        assert!(validate(&config, "").is_err());

        config.version_policy = VersionPolicy::Specific { versions: vec![] };
        assert!(validate(&config, "").is_err());

        config.version_policy = VersionPolicy::Specific { versions: vec![3] };
        assert!(validate(&config, "").is_ok());
    }
}
