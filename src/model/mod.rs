// Report model - hierarchical suite/test result tree
// Passive data: construction and traversal only, no behavior

pub mod stats;

pub use stats::ReportStats;

use serde::{Deserialize, Serialize};

/// Separator used when joining suite/test titles into a full title.
/// The same token separates path segments in failure-block headers,
/// so full titles and parsed paths share one vocabulary.
pub const TITLE_SEPARATOR: &str = " > ";

/// Terminal state of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
    Pending,
}

/// Failure detail attached to a failed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFailure {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

/// Leaf node: one test outcome within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestNode {
    pub title: String,
    pub full_title: String,
    pub state: TestState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<TestFailure>,
}

impl TestNode {
    /// Create a passed test
    pub fn pass(title: impl Into<String>, full_title: impl Into<String>, duration_ms: Option<u64>) -> Self {
        Self {
            title: title.into(),
            full_title: full_title.into(),
            state: TestState::Passed,
            duration_ms,
            error: None,
        }
    }

    /// Create a failed test with its failure detail
    pub fn fail(
        title: impl Into<String>,
        full_title: impl Into<String>,
        message: impl Into<String>,
        stack: Option<String>,
        duration_ms: Option<u64>,
    ) -> Self {
        Self {
            title: title.into(),
            full_title: full_title.into(),
            state: TestState::Failed,
            duration_ms,
            error: Some(TestFailure {
                message: message.into(),
                stack,
            }),
        }
    }

    /// Create a pending (skipped) test
    pub fn pending(title: impl Into<String>, full_title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            full_title: full_title.into(),
            state: TestState::Pending,
            duration_ms: None,
            error: None,
        }
    }
}

/// Suite node: ordered child suites and tests.
/// The root suite has empty title/full_title and is never emitted
/// as a labeled node itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteNode {
    pub title: String,
    pub full_title: String,
    pub suites: Vec<SuiteNode>,
    pub tests: Vec<TestNode>,
}

impl SuiteNode {
    /// Create the unlabeled root suite
    pub fn root() -> Self {
        Self {
            title: String::new(),
            full_title: String::new(),
            suites: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Create a labeled suite under the given parent full title
    pub fn new(title: impl Into<String>, parent_full_title: &str) -> Self {
        let title = title.into();
        let full_title = join_titles(parent_full_title, &title);
        Self {
            title,
            full_title,
            suites: Vec::new(),
            tests: Vec::new(),
        }
    }

    /// Append a child suite, returning a mutable reference to it
    pub fn push_suite(&mut self, suite: SuiteNode) -> &mut SuiteNode {
        self.suites.push(suite);
        self.suites.last_mut().unwrap()
    }

    /// Append a child test
    pub fn push_test(&mut self, test: TestNode) {
        self.tests.push(test);
    }

    /// Total number of tests in this suite and all nested suites
    pub fn total_tests(&self) -> usize {
        self.tests.len() + self.suites.iter().map(SuiteNode::total_tests).sum::<usize>()
    }

    /// Depth of the deepest nested suite chain below this node
    pub fn depth(&self) -> usize {
        self.suites.iter().map(|s| 1 + s.depth()).max().unwrap_or(0)
    }
}

/// Join a parent full title and a child title.
/// The root's empty full title contributes no separator.
pub fn join_titles(parent_full_title: &str, title: &str) -> String {
    if parent_full_title.is_empty() {
        title.to_string()
    } else {
        format!("{}{}{}", parent_full_title, TITLE_SEPARATOR, title)
    }
}

/// One complete outcome snapshot of a single test execution.
/// Created fresh per run and discarded after correlation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub stats: ReportStats,
    pub root: SuiteNode,
}

impl Report {
    pub fn new(stats: ReportStats, root: SuiteNode) -> Self {
        Self { stats, root }
    }
}
