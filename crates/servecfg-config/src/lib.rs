//! Model serving configuration: data model, normalization and validation.
//!
//! This crate owns the [`ModelConfig`] record that describes one model's
//! serving configuration, the closed set of known [`Platform`]s with their
//! per-platform adapter defaults, and the two contracts the validation
//! harness drives:
//!
//! - [`normalize`] — read a model directory's optional `config.yaml` and
//!   fill in defaults, deriving missing fields from the version directory's
//!   artifacts when autofill is enabled.
//! - [`validate`] — accept or reject a normalized configuration against the
//!   platform schema rules.
//!
//! # Quick start
//!
//! ```no_run
//! use servecfg_config::{normalize, validate, PlatformRegistry};
//! use std::path::Path;
//!
//! let registry = PlatformRegistry::with_defaults();
//! let config = normalize(Path::new("repo/addsub"), &registry, true)?;
//! validate(&config, "")?;
//! println!("{}", config.render()?);
//! # Ok::<(), servecfg_config::ConfigError>(())
//! ```

pub mod config;
pub mod error;
pub mod normalize;
pub mod platform;
pub mod validate;

pub use config::{DataType, MODEL_CONFIG_FILENAME, ModelConfig, ModelIo, VersionPolicy};
pub use error::{ConfigError, Result};
pub use normalize::normalize;
pub use platform::{AdapterConfig, Platform, PlatformRegistry};
pub use validate::validate;
