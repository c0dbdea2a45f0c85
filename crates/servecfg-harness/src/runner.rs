//! Directory-driven golden test execution.
//!
//! [`GoldenTestRunner`] discovers model directories under a fixture set,
//! optionally rewrites each model's platform declaration in place, runs the
//! validation pipeline and judges pass/fail against `expected*` golden
//! files by truncated-prefix comparison.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use servecfg_config::ModelConfig;

use crate::bundle::BundleInitializer;
use crate::error::HarnessError;
use crate::pipeline::validate_init;
use crate::report::{Reporter, RunSummary, TracingReporter};

/// Environment variable naming the fixture root directory.
pub const FIXTURE_ROOT_ENV: &str = "SERVECFG_FIXTURE_ROOT";

/// Fixture set exercised without autofill and with a forced platform.
pub const SANITY_TEST_SET: &str = "testdata/model_config_sanity";

/// Fixture set exercised with autofill and no platform override.
pub const AUTOFILL_TEST_SET: &str = "testdata/autofill_sanity";

/// Name prefix marking a golden candidate file in a model directory.
const GOLDEN_PREFIX: &str = "expected";

// ---------------------------------------------------------------------------
// GoldenTestRunner
// ---------------------------------------------------------------------------

/// Runs the validation pipeline across a tree of model fixtures.
///
/// Runs are strictly sequential: one model directory is fully processed
/// before the next begins. The platform override rewrites fixture
/// configuration files in place, so a fixture tree must not be shared by
/// concurrent runs; repeated runs are safe because the rewrite is
/// idempotent.
#[derive(Debug)]
pub struct GoldenTestRunner<R = TracingReporter> {
    fixture_root: PathBuf,
    reporter: R,
}

impl GoldenTestRunner<TracingReporter> {
    /// Runner over `fixture_root` reporting through `tracing`.
    pub fn new(fixture_root: impl Into<PathBuf>) -> Self {
        Self::with_reporter(fixture_root, TracingReporter)
    }

    /// Runner whose fixture root comes from [`FIXTURE_ROOT_ENV`].
    pub fn from_env() -> Result<Self, HarnessError> {
        let root = std::env::var_os(FIXTURE_ROOT_ENV)
            .ok_or(HarnessError::FixtureRootUnset { var: FIXTURE_ROOT_ENV })?;
        Ok(Self::new(PathBuf::from(root)))
    }
}

impl<R: Reporter> GoldenTestRunner<R> {
    /// Runner with a caller-supplied reporter.
    pub fn with_reporter(fixture_root: impl Into<PathBuf>, reporter: R) -> Self {
        Self { fixture_root: fixture_root.into(), reporter }
    }

    /// The reporter, for inspection after a run.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consume the runner, yielding its reporter.
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// Run every model directory under `test_set_path` and compare each
    /// against its golden files.
    ///
    /// A failure to list the test set directory or to write back an
    /// overridden configuration aborts the whole run; a golden mismatch is
    /// recorded against the model and the run continues.
    pub fn validate_one(
        &mut self,
        test_set_path: &str,
        autofill: bool,
        platform_override: Option<&str>,
        initializer: &dyn BundleInitializer,
    ) -> Result<RunSummary, HarnessError> {
        let base_path = self.fixture_root.join(test_set_path);

        let entries = fs::read_dir(&base_path)
            .map_err(|source| HarnessError::DirectoryListing { path: base_path.clone(), source })?;

        let mut summary = RunSummary::default();
        for entry in entries {
            let entry = entry.map_err(|source| HarnessError::DirectoryListing {
                path: base_path.clone(),
                source,
            })?;
            let model_name = entry.file_name().to_string_lossy().into_owned();
            let model_path = base_path.join(&model_name);

            if let Some(platform) = platform_override {
                apply_platform_override(&model_path, platform)?;
            }

            info!(model = %model_name, "testing");
            let actual = match validate_init(&model_path, autofill, initializer) {
                Ok(rendered) => rendered,
                Err(err) => err.to_string(),
            };

            summary.tested += 1;
            match self.compare_against_goldens(&model_path, &actual) {
                None => self.reporter.pass(&model_name),
                Some(expected) => {
                    self.reporter.fail(&model_name, &expected, &actual);
                    summary.failures.push(model_name);
                }
            }
        }
        Ok(summary)
    }

    /// Run both fixed fixture sets: the sanity set without autofill and with
    /// the platform forced, then the autofill set with no override.
    pub fn validate_all(
        &mut self,
        platform: &str,
        initializer: &dyn BundleInitializer,
    ) -> Result<RunSummary, HarnessError> {
        let mut summary =
            self.validate_one(SANITY_TEST_SET, false, Some(platform), initializer)?;
        summary.merge(self.validate_one(AUTOFILL_TEST_SET, true, None, initializer)?);
        Ok(summary)
    }

    /// Compare `actual` against every golden candidate of the model.
    ///
    /// Returns `None` on pass — first matching candidate wins, or no
    /// candidate exists at all. Returns the last non-matching candidate's
    /// content otherwise; each mismatch overwrites the previous one, which
    /// makes the retained diagnostic the last candidate examined.
    fn compare_against_goldens(&self, model_path: &Path, actual: &str) -> Option<String> {
        let mut fail_expected: Option<String> = None;

        let Ok(entries) = fs::read_dir(model_path) else {
            // A model directory that cannot be listed has no candidates to
            // compare against; the model trivially passes.
            return None;
        };
        for entry in entries.flatten() {
            let child = entry.file_name().to_string_lossy().into_owned();
            // Tolerate nested-path artifacts: the comparison key is the name
            // up to the first path separator.
            let real_child = child.split('/').next().unwrap_or(&child);
            if !real_child.starts_with(GOLDEN_PREFIX) {
                continue;
            }

            let expected_path = model_path.join(real_child);
            info!(candidate = %expected_path.display(), "comparing with");
            let expected = fs::read_to_string(&expected_path).unwrap_or_else(|err| {
                debug!(candidate = %expected_path.display(), %err, "unreadable candidate");
                String::new()
            });

            if golden_matches(&expected, actual) {
                fail_expected = None;
                break;
            }
            fail_expected = Some(expected);
        }
        fail_expected
    }
}

/// Truncated-prefix equality: a candidate shorter than `actual` is compared
/// against the prefix of `actual` of the candidate's own length; otherwise
/// the comparison is exact. Only the candidate may be shorter, never the
/// reverse.
fn golden_matches(expected: &str, actual: &str) -> bool {
    if expected.len() < actual.len() {
        actual.as_bytes().starts_with(expected.as_bytes())
    } else {
        expected == actual
    }
}

/// Overwrite the platform field of the model's on-disk configuration, when
/// one exists. Intentionally destructive; assumes exclusive single-run use
/// of the fixture tree.
fn apply_platform_override(model_path: &Path, platform: &str) -> Result<(), HarnessError> {
    let config_path = ModelConfig::file_path(model_path);
    if !config_path.exists() {
        return Ok(());
    }
    let mut config = ModelConfig::read_file(&config_path)
        .map_err(|source| HarnessError::ConfigRewrite { path: config_path.clone(), source })?;
    config.platform = platform.to_string();
    config
        .write_file(&config_path)
        .map_err(|source| HarnessError::ConfigRewrite { path: config_path, source })
}
