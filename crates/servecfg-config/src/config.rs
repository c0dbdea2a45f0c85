//! The model serving configuration record and its on-disk representation.
//!
//! A [`ModelConfig`] lives as `config.yaml` inside a model directory. It is
//! constructed empty, populated by normalization, checked by validation and
//! consumed read-only by bundle initializers and by [`ModelConfig::render`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Filename of the configuration file inside a model directory.
pub const MODEL_CONFIG_FILENAME: &str = "config.yaml";

// ---------------------------------------------------------------------------
// DataType
// ---------------------------------------------------------------------------

/// Element type of a signature tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Bool,
    Uint8,
    Int8,
    Int16,
    Int32,
    Int64,
    Fp16,
    Fp32,
    Fp64,
    String,
}

// ---------------------------------------------------------------------------
// VersionPolicy
// ---------------------------------------------------------------------------

/// Which numbered versions of a model are made available for serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VersionPolicy {
    /// Serve only the `num_versions` highest-numbered versions.
    Latest { num_versions: u32 },
    /// Serve every version present in the model directory.
    All,
    /// Serve exactly the listed versions.
    Specific { versions: Vec<u64> },
}

impl Default for VersionPolicy {
    fn default() -> Self {
        VersionPolicy::Latest { num_versions: 1 }
    }
}

// ---------------------------------------------------------------------------
// ModelIo
// ---------------------------------------------------------------------------

/// One input or output entry of the model signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelIo {
    pub name: String,
    pub data_type: DataType,
    /// Tensor dimensions; `-1` is the variable-size wildcard.
    #[serde(default)]
    pub dims: Vec<i64>,
}

// ---------------------------------------------------------------------------
// ModelConfig
// ---------------------------------------------------------------------------

/// A model's serving configuration.
///
/// Field declaration order is the canonical rendering order — the golden
/// comparison in the harness depends on it staying stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ModelConfig {
    /// Model name; normalization derives it from the directory name when
    /// left empty.
    pub name: String,
    /// Platform identifier, one of the known platform names.
    pub platform: String,
    /// Maximum batch size the model accepts; normalization defaults 0 to 1.
    pub max_batch_size: u32,
    /// Which versions are served.
    pub version_policy: VersionPolicy,
    /// Artifact filename inside a version directory; normalization fills the
    /// platform default when empty.
    pub default_model_filename: String,
    /// Input signature.
    pub input: Vec<ModelIo>,
    /// Output signature.
    pub output: Vec<ModelIo>,
    /// Backend-specific parameters. Ordered map so rendering stays
    /// deterministic.
    pub parameters: BTreeMap<String, String>,
}

impl ModelConfig {
    /// Render the configuration to its canonical deterministic textual form.
    ///
    /// This is the string compared against `expected*` golden files and the
    /// representation written back to disk by [`ModelConfig::write_file`].
    pub fn render(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }

    /// Read a configuration from a structured text file.
    pub fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_yaml::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Write the configuration back as structured text.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let text = self.render()?;
        std::fs::write(path, text)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Path of the configuration file inside `model_dir`.
    pub fn file_path(model_dir: &Path) -> std::path::PathBuf {
        model_dir.join(MODEL_CONFIG_FILENAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_config() -> ModelConfig {
        ModelConfig {
            name: "addsub".to_string(),
            platform: "tensorflow_graphdef".to_string(),
            max_batch_size: 8,
            version_policy: VersionPolicy::default(),
            default_model_filename: "model.graphdef".to_string(),
            input: vec![ModelIo {
                name: "INPUT0".to_string(),
                data_type: DataType::Fp32,
                dims: vec![16],
            }],
            output: vec![ModelIo {
                name: "OUTPUT0".to_string(),
                data_type: DataType::Fp32,
                dims: vec![16],
            }],
            parameters: BTreeMap::new(),
        }
    }

    #[test]
    fn default_version_policy_is_latest_one() {
        assert_eq!(VersionPolicy::default(), VersionPolicy::Latest { num_versions: 1 });
    }

    #[test]
    fn render_is_deterministic() {
        let config = sample_config();
        assert_eq!(config.render().unwrap(), config.render().unwrap());
    }

    #[test]
    fn render_starts_with_name_field() {
        // Declaration order puts `name` first; the truncated golden
        // comparison relies on the leading fields staying put.
        let rendered = sample_config().render().unwrap();
        assert!(rendered.starts_with("name: addsub"), "got: {rendered}");
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = ModelConfig::file_path(dir.path());
        let config = sample_config();
        config.write_file(&path).unwrap();
        let read_back = ModelConfig::read_file(&path).unwrap();
        assert_eq!(read_back, config);
    }

    #[test]
    fn partial_file_parses_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MODEL_CONFIG_FILENAME);
        std::fs::write(&path, "platform: tensorrt_plan\n").unwrap();
        let config = ModelConfig::read_file(&path).unwrap();
        assert_eq!(config.platform, "tensorrt_plan");
        assert!(config.name.is_empty());
        assert_eq!(config.max_batch_size, 0);
        assert_eq!(config.version_policy, VersionPolicy::default());
    }

    #[test]
    fn unreadable_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MODEL_CONFIG_FILENAME);
        let err = ModelConfig::read_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MODEL_CONFIG_FILENAME);
        std::fs::write(&path, "name: [unterminated\n").unwrap();
        let err = ModelConfig::read_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
