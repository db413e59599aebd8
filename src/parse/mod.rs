// Console output parsing
// Recovers a title -> outcome map from captured runner output when no
// structured event stream is available. Two independent passes over the
// cleaned text: result lines first, then failure-detail blocks.

pub mod ansi;
mod failures;
mod results;

pub use ansi::strip_ansi;

use crate::config::ParserConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Outcome recovered for one test display title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOutcome {
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Map from test display title (not full path) to its parsed outcome.
/// Titles are assumed unique within one parse; the last occurrence of a
/// duplicate title wins.
pub type ParsedResultMap = HashMap<String, ParsedOutcome>;

/// Parse one blob of captured console output.
///
/// Empty or unparseable input yields an empty map, never an error.
/// Failure blocks whose test title has no matching result line are
/// discarded.
pub fn parse_output(text: &str, config: &ParserConfig) -> ParsedResultMap {
    let clean = strip_ansi(text);

    let mut map = results::scan_result_lines(&clean, config);

    for block in failures::scan_failure_blocks(&clean, config) {
        let title = block
            .path
            .rsplit(config.path_separator.as_str())
            .next()
            .unwrap_or(&block.path)
            .trim();

        match map.get_mut(title) {
            Some(outcome) if !block.body.is_empty() => {
                outcome.message = Some(block.body);
            }
            Some(_) => {}
            None => {
                debug!("discarding failure block for unknown test '{}'", title);
            }
        }
    }

    map
}
