//! Machine-readable run summary for CI consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utplsq_core::RunAggregator;

/// Aggregate outcome of a package or suite run, serializable alongside the
/// XML report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummaryArtifact {
    pub suite_name: String,
    pub generated_at: DateTime<Utc>,
    pub tests_run: u64,
    pub successes: u64,
    pub failures: u64,
    pub failure_summaries: Vec<String>,
    /// Digest of the rendered XML report, when one exists for this level.
    pub report_digest: Option<String>,
}

impl RunSummaryArtifact {
    /// Build a summary from an aggregator snapshot.
    pub fn new(
        suite_name: impl Into<String>,
        aggregator: &RunAggregator,
        report_digest: Option<String>,
    ) -> Self {
        Self {
            suite_name: suite_name.into(),
            generated_at: Utc::now(),
            tests_run: aggregator.tests_run(),
            successes: aggregator.successes(),
            failures: aggregator.failures(),
            failure_summaries: aggregator.failure_summaries().to_vec(),
            report_digest,
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
