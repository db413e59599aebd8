// Aggregate counters for one report

use serde::{Deserialize, Serialize};

/// Counts accumulated over one test execution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportStats {
    pub suites: usize,
    pub tests: usize,
    pub passes: usize,
    pub pending: usize,
    pub failures: usize,
    /// Unix timestamp (seconds) when the run began
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    /// Unix timestamp (seconds) when the run ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ReportStats {
    /// Check whether every executed test passed
    pub fn all_passed(&self) -> bool {
        self.failures == 0
    }
}
