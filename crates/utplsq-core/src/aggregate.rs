//! Per-run outcome accumulation.

use serde::{Deserialize, Serialize};

use crate::record::DescriptionRecord;

/// The one status literal utPLSQL uses for a passing outcome. Any other
/// status counts as a failure; the framework only ever emits two statuses
/// in practice, but a third must not crash the accumulator.
pub const STATUS_SUCCESS: &str = "SUCCESS";

/// Accumulates the outcomes of one test run.
///
/// Holds the success/failure counters, the failure summaries in encounter
/// order, and the render buffer the report projection appends per-case
/// fragments into. Counters satisfy `successes + failures == lines
/// processed`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunAggregator {
    successes: u64,
    failures: u64,
    failure_summaries: Vec<String>,
    body: String,
}

impl RunAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decoded outcome. On a non-success status a compact
    /// summary (procedure, test, message joined by newlines) is appended
    /// to the failure list.
    pub fn record(&mut self, status: &str, record: &DescriptionRecord) {
        if status == STATUS_SUCCESS {
            self.successes += 1;
        } else {
            self.failures += 1;
            self.failure_summaries.push(format!(
                "{}\n{}\n{}",
                record.procedure_name, record.test_name, record.result_message
            ));
        }
    }

    /// Fold another run's counts and failure summaries into this one.
    ///
    /// Merging is associative and commutative on the counts and
    /// concatenating on the failure list, so incremental and batch merges
    /// of package runs produce identical suite totals. The render buffer
    /// is not merged; each package renders its own report.
    pub fn merge(&mut self, other: RunAggregator) {
        self.successes += other.successes;
        self.failures += other.failures;
        self.failure_summaries.extend(other.failure_summaries);
    }

    /// Append a rendered fragment to the report body buffer.
    pub fn push_body(&mut self, fragment: &str) {
        self.body.push_str(fragment);
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn successes(&self) -> u64 {
        self.successes
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Total lines processed.
    pub fn tests_run(&self) -> u64 {
        self.successes + self.failures
    }

    pub fn failure_summaries(&self) -> &[String] {
        &self.failure_summaries
    }
}
