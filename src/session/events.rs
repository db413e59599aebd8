// Session events - typed lifecycle vocabulary of one test run
// Serializable so captured runs can be replayed as JSON lines

use serde::{Deserialize, Serialize};

/// Error value carried by a failed test event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub stack: Option<String>,
}

/// One lifecycle notification from a running test session.
/// This is the complete vocabulary; nothing else is consumed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Run started (fires once)
    RunBegin,

    /// Entered a suite. The implicit root suite signals with `root: true`.
    SuiteBegin {
        title: String,
        #[serde(default)]
        root: bool,
    },

    /// Left a suite
    SuiteEnd {
        title: String,
        #[serde(default)]
        root: bool,
    },

    /// A test passed
    TestPass {
        title: String,
        #[serde(default)]
        duration_ms: Option<u64>,
    },

    /// A test failed
    TestFail {
        title: String,
        #[serde(default)]
        duration_ms: Option<u64>,
        #[serde(default)]
        error: ErrorInfo,
    },

    /// A test was registered but not run
    TestPending { title: String },

    /// Run finished (fires once). The runner's own wall-clock, if it
    /// reports one, rides along here.
    RunEnd {
        #[serde(default)]
        duration_ms: Option<u64>,
    },
}
