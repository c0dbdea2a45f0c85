//! Pass/fail reporting for golden test runs.

use serde::Serialize;
use tracing::{error, info};

/// Observer for per-model golden comparison outcomes.
pub trait Reporter {
    fn pass(&mut self, model: &str);
    fn fail(&mut self, model: &str, expected: &str, actual: &str);
}

/// Default reporter: structured logging via `tracing`.
///
/// A failing model logs both the retained expected content and the captured
/// actual output for diff-by-eye inspection.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn pass(&mut self, model: &str) {
        info!(model, "golden comparison passed");
    }

    fn fail(&mut self, model: &str, expected: &str, actual: &str) {
        error!(model, "golden comparison failed");
        error!("Expected:\n{expected}");
        error!("Actual:\n{actual}");
    }
}

/// Records every outcome; the assertion sink used by the harness's own
/// tests and usable by any external test framework.
#[derive(Debug, Clone, Default)]
pub struct RecordingReporter {
    pub passed: Vec<String>,
    pub failed: Vec<FailedModel>,
}

/// One recorded failure: the model plus both sides of the mismatch.
#[derive(Debug, Clone)]
pub struct FailedModel {
    pub model: String,
    pub expected: String,
    pub actual: String,
}

impl Reporter for RecordingReporter {
    fn pass(&mut self, model: &str) {
        self.passed.push(model.to_string());
    }

    fn fail(&mut self, model: &str, expected: &str, actual: &str) {
        self.failed.push(FailedModel {
            model: model.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
}

/// Aggregate outcome of one `validate_one` / `validate_all` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Number of model directories processed.
    pub tested: usize,
    /// Names of models whose golden comparison failed.
    pub failures: Vec<String>,
}

impl RunSummary {
    /// Whether every model passed.
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold another summary into this one.
    pub fn merge(&mut self, other: RunSummary) {
        self.tested += other.tested;
        self.failures.extend(other.failures);
    }
}
