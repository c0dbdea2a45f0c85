//! Known serving platforms and the per-platform adapter registry.
//!
//! A platform identifies the backend execution engine a model declares.
//! The set is closed: normalization and validation only accept the five
//! platforms enumerated here.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Platform name constants
// ---------------------------------------------------------------------------

/// Platform name for TensorFlow GraphDef models.
pub const PLATFORM_GRAPHDEF: &str = "tensorflow_graphdef";
/// Platform name for TensorFlow SavedModel models.
pub const PLATFORM_SAVEDMODEL: &str = "tensorflow_savedmodel";
/// Platform name for Caffe2 NetDef models.
pub const PLATFORM_NETDEF: &str = "caffe2_netdef";
/// Platform name for TensorRT Plan models.
pub const PLATFORM_PLAN: &str = "tensorrt_plan";
/// Platform name for custom backend models.
pub const PLATFORM_CUSTOM: &str = "custom";

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// The closed set of backend execution engines a model may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    GraphDef,
    SavedModel,
    NetDef,
    Plan,
    Custom,
}

impl Platform {
    /// All known platforms, in registry order.
    pub const ALL: [Platform; 5] = [
        Platform::GraphDef,
        Platform::SavedModel,
        Platform::NetDef,
        Platform::Plan,
        Platform::Custom,
    ];

    /// The platform's canonical name string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::GraphDef => PLATFORM_GRAPHDEF,
            Platform::SavedModel => PLATFORM_SAVEDMODEL,
            Platform::NetDef => PLATFORM_NETDEF,
            Platform::Plan => PLATFORM_PLAN,
            Platform::Custom => PLATFORM_CUSTOM,
        }
    }

    /// Default artifact filename expected inside a version directory.
    ///
    /// For [`Platform::SavedModel`] the artifact is a directory, for every
    /// other platform it is a regular file.
    pub fn default_artifact(&self) -> &'static str {
        match self {
            Platform::GraphDef => "model.graphdef",
            Platform::SavedModel => "model.savedmodel",
            Platform::NetDef => "model.netdef",
            Platform::Plan => "model.plan",
            Platform::Custom => "libcustom.so",
        }
    }

    /// Whether the artifact for this platform is a directory.
    pub fn artifact_is_dir(&self) -> bool {
        matches!(self, Platform::SavedModel)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PLATFORM_GRAPHDEF => Ok(Platform::GraphDef),
            PLATFORM_SAVEDMODEL => Ok(Platform::SavedModel),
            PLATFORM_NETDEF => Ok(Platform::NetDef),
            PLATFORM_PLAN => Ok(Platform::Plan),
            PLATFORM_CUSTOM => Ok(Platform::Custom),
            other => Err(ConfigError::UnknownPlatform { platform: other.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// AdapterConfig
// ---------------------------------------------------------------------------

/// Per-platform adapter settings used by normalization.
///
/// One variant per platform; each carries that platform's defaults. Today
/// that is the artifact filename the platform expects in a version
/// directory, which both autofill platform detection and the artifact
/// initializer key off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterConfig {
    GraphDef { artifact_filename: String },
    SavedModel { artifact_filename: String },
    NetDef { artifact_filename: String },
    Plan { artifact_filename: String },
    Custom { artifact_filename: String },
}

impl AdapterConfig {
    /// Default adapter settings for `platform`.
    pub fn for_platform(platform: Platform) -> Self {
        let artifact_filename = platform.default_artifact().to_string();
        match platform {
            Platform::GraphDef => AdapterConfig::GraphDef { artifact_filename },
            Platform::SavedModel => AdapterConfig::SavedModel { artifact_filename },
            Platform::NetDef => AdapterConfig::NetDef { artifact_filename },
            Platform::Plan => AdapterConfig::Plan { artifact_filename },
            Platform::Custom => AdapterConfig::Custom { artifact_filename },
        }
    }

    /// Artifact filename this adapter expects inside a version directory.
    pub fn artifact_filename(&self) -> &str {
        match self {
            AdapterConfig::GraphDef { artifact_filename }
            | AdapterConfig::SavedModel { artifact_filename }
            | AdapterConfig::NetDef { artifact_filename }
            | AdapterConfig::Plan { artifact_filename }
            | AdapterConfig::Custom { artifact_filename } => artifact_filename,
        }
    }
}

// ---------------------------------------------------------------------------
// PlatformRegistry
// ---------------------------------------------------------------------------

/// Mapping from platform name to adapter settings.
///
/// Built once per validation run and read-only afterward. Iteration order is
/// the ordered-map order of the platform name strings, so autofill platform
/// probing is deterministic.
#[derive(Debug, Clone, Default)]
pub struct PlatformRegistry {
    entries: BTreeMap<String, AdapterConfig>,
}

impl PlatformRegistry {
    /// Empty registry. Mostly useful in tests exercising lookup failures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with one entry per known platform, each carrying that
    /// platform's default adapter settings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for platform in Platform::ALL {
            registry.insert(platform, AdapterConfig::for_platform(platform));
        }
        registry
    }

    /// Insert or replace the adapter settings for `platform`.
    pub fn insert(&mut self, platform: Platform, adapter: AdapterConfig) {
        self.entries.insert(platform.as_str().to_string(), adapter);
    }

    /// Look up adapter settings by platform name.
    pub fn get(&self, platform_name: &str) -> Option<&AdapterConfig> {
        self.entries.get(platform_name)
    }

    /// Whether `platform_name` is registered.
    pub fn contains(&self, platform_name: &str) -> bool {
        self.entries.contains_key(platform_name)
    }

    /// Iterate `(platform name, adapter)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AdapterConfig)> {
        self.entries.iter().map(|(name, adapter)| (name.as_str(), adapter))
    }

    /// Number of registered platforms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
