//! Input boundary: the external store of raw run outcomes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One row of the external result store: a status literal plus the raw
/// description text, which may contain embedded newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRow {
    pub status: String,
    pub description: String,
}

impl OutcomeRow {
    pub fn new(status: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            description: description.into(),
        }
    }
}

/// Injectable source of the ordered outcome rows for one test run.
///
/// Implement this trait to plug in a real result store or test stubs. Row
/// order is the store's encounter order and must be preserved; the decoder
/// and aggregator mirror it end-to-end so reports are reproducible.
#[async_trait]
pub trait OutcomeSource: Send + Sync {
    /// Fetch every outcome row recorded for `run_key`, in order.
    async fn fetch_outcomes(&self, run_key: i64) -> anyhow::Result<Vec<OutcomeRow>>;
}
