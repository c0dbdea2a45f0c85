//! Builders for model fixture trees.
//!
//! A fixture model directory holds an optional `config.yaml`, a `1/`
//! version subdirectory and zero-or-more `expected*` golden files. The
//! builder writes that layout under a caller-owned base directory (usually
//! a `tempfile::TempDir`). Setup failures panic — this is test plumbing.

use std::fs;
use std::path::{Path, PathBuf};

use servecfg_config::{MODEL_CONFIG_FILENAME, ModelConfig};

/// Builds one model directory inside a fixture tree.
pub struct ModelDirBuilder {
    dir: PathBuf,
}

impl ModelDirBuilder {
    /// Create `<base>/<name>` with an empty `1/` version subdirectory.
    pub fn new(base: &Path, name: &str) -> Self {
        let dir = base.join(name);
        fs::create_dir_all(dir.join("1")).expect("create model fixture dir");
        Self { dir }
    }

    /// Write `config.yaml` from raw text.
    pub fn config_text(self, yaml: &str) -> Self {
        fs::write(self.dir.join(MODEL_CONFIG_FILENAME), yaml).expect("write fixture config");
        self
    }

    /// Write `config.yaml` from a typed configuration.
    pub fn config(self, config: &ModelConfig) -> Self {
        config
            .write_file(&self.dir.join(MODEL_CONFIG_FILENAME))
            .expect("write fixture config");
        self
    }

    /// Create an empty artifact file inside the `1/` version directory.
    pub fn artifact(self, filename: &str) -> Self {
        fs::write(self.dir.join("1").join(filename), b"").expect("write fixture artifact");
        self
    }

    /// Create an artifact directory inside the `1/` version directory.
    pub fn artifact_dir(self, dirname: &str) -> Self {
        fs::create_dir_all(self.dir.join("1").join(dirname)).expect("create fixture artifact dir");
        self
    }

    /// Write a golden file directly under the model directory.
    pub fn expected(self, name: &str, content: &str) -> Self {
        fs::write(self.dir.join(name), content).expect("write fixture golden");
        self
    }

    /// The model directory path.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Finish, returning the model directory path.
    pub fn build(self) -> PathBuf {
        self.dir
    }
}
