//! Golden-output validation harness for model serving configurations.
//!
//! Two layers, the second built on the first:
//!
//! - [`validate_init`] — the configuration validation pipeline: normalize a
//!   model directory's configuration, validate it against the platform
//!   schema rules, drive a [`BundleInitializer`] over the model's `1/`
//!   version directory, and render the result to its canonical textual
//!   form.
//! - [`GoldenTestRunner`] — directory-driven test execution: discover model
//!   fixtures, optionally force a platform in place, run the pipeline and
//!   judge pass/fail against `expected*` golden files with
//!   truncated-prefix comparison.
//!
//! # Quick start
//!
//! ```no_run
//! use servecfg_harness::{ArtifactBundleInit, GoldenTestRunner};
//!
//! let mut runner = GoldenTestRunner::new("testdata_root");
//! let summary = runner.validate_one(
//!     "testdata/model_config_sanity",
//!     false,
//!     Some("tensorflow_graphdef"),
//!     &ArtifactBundleInit,
//! )?;
//! assert!(summary.passed());
//! # Ok::<(), servecfg_harness::HarnessError>(())
//! ```

pub mod bundle;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod runner;

pub use bundle::{ArtifactBundleInit, BundleInitializer, NoopBundleInit};
pub use error::{HarnessError, PipelineError};
pub use pipeline::validate_init;
pub use report::{FailedModel, RecordingReporter, Reporter, RunSummary, TracingReporter};
pub use runner::{
    AUTOFILL_TEST_SET, FIXTURE_ROOT_ENV, GoldenTestRunner, SANITY_TEST_SET,
};
