// Tree correlation
// Applies a fresh outcome source (parsed map or structured report) onto
// an externally owned test tree. Only outcomes are written; structure
// and identities are never touched.

pub mod tree;

pub use tree::TreeNode;

use crate::model::{Report, SuiteNode, TestNode, TestState};
use crate::parse::{ParsedOutcome, ParsedResultMap};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Outcome recorded on a correlated tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Passed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    Failed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration_ms: Option<u64>,
    },
    Pending,
}

/// A node of the caller-owned test tree.
/// Correlation reads the label and hierarchy and writes the outcome.
pub trait TestItem {
    fn label(&self) -> &str;
    fn children(&self) -> &[Self]
    where
        Self: Sized;
    fn children_mut(&mut self) -> &mut [Self]
    where
        Self: Sized;
    fn set_outcome(&mut self, outcome: TestOutcome);
}

/// Duplicate-title handling for flat-map correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorrelationMode {
    /// Duplicate titles all receive the same outcome (documented
    /// imprecision of title-keyed console output)
    #[default]
    Lenient,
    /// Titles matching more than one node in the subtree are refused
    /// and surfaced as a warning
    Strict,
}

/// Apply a parsed console-output map onto the tree, matching by short
/// display title.
///
/// Depth-first pre-order: a child whose label is a map key takes the
/// outcome and its subtree is not descended; otherwise the walk
/// recurses. Nodes with no match anywhere stay unannotated.
pub fn apply_parsed<T: TestItem>(root: &mut T, results: &ParsedResultMap, mode: CorrelationMode) {
    let refused = match mode {
        CorrelationMode::Lenient => HashSet::new(),
        CorrelationMode::Strict => duplicate_titles(root, results),
    };
    apply_parsed_walk(root, results, &refused);
}

fn apply_parsed_walk<T: TestItem>(
    node: &mut T,
    results: &ParsedResultMap,
    refused: &HashSet<String>,
) {
    for child in node.children_mut() {
        let hit = if refused.contains(child.label()) {
            None
        } else {
            results.get(child.label()).cloned()
        };

        match hit {
            Some(outcome) => child.set_outcome(parsed_outcome(&outcome)),
            None => apply_parsed_walk(child, results, refused),
        }
    }
}

/// Titles that would match more than one node in the subtree
fn duplicate_titles<T: TestItem>(root: &T, results: &ParsedResultMap) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    count_matches(root, results, &mut counts);

    let mut refused = HashSet::new();
    for (title, count) in counts {
        if count > 1 {
            warn!(
                "title '{}' matches {} nodes; refusing to correlate it",
                title, count
            );
            refused.insert(title);
        }
    }
    refused
}

fn count_matches<T: TestItem>(
    node: &T,
    results: &ParsedResultMap,
    counts: &mut HashMap<String, usize>,
) {
    for child in node.children() {
        if results.contains_key(child.label()) {
            *counts.entry(child.label().to_string()).or_insert(0) += 1;
        }
        count_matches(child, results, counts);
    }
}

fn parsed_outcome(parsed: &ParsedOutcome) -> TestOutcome {
    if parsed.passed {
        TestOutcome::Passed { duration_ms: None }
    } else {
        TestOutcome::Failed {
            message: parsed.message.clone(),
            duration_ms: None,
        }
    }
}

/// Apply a structured report onto the tree.
///
/// Suites are matched structurally (title per level, which is full-title
/// equality by construction) before descending into their tests. Tree
/// layers with no counterpart in the report, such as file groupings,
/// are descended with the same suite.
pub fn apply_report<T: TestItem>(root: &mut T, report: &Report) {
    apply_suite(root, &report.root);
}

fn apply_suite<T: TestItem>(node: &mut T, suite: &SuiteNode) {
    for child in node.children_mut() {
        if let Some(child_suite) = suite.suites.iter().find(|s| s.title == child.label()) {
            apply_suite(child, child_suite);
        } else if let Some(test) = suite.tests.iter().find(|t| t.title == child.label()) {
            child.set_outcome(test_outcome(test));
        } else {
            apply_suite(child, suite);
        }
    }
}

fn test_outcome(test: &TestNode) -> TestOutcome {
    match test.state {
        TestState::Passed => TestOutcome::Passed {
            duration_ms: test.duration_ms,
        },
        TestState::Failed => TestOutcome::Failed {
            message: test.error.as_ref().map(|e| e.message.clone()),
            duration_ms: test.duration_ms,
        },
        TestState::Pending => TestOutcome::Pending,
    }
}
