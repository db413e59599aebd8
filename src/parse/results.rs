// Result-line pass
// A line is a result only if it has the exact shape
// "<indent><single symbol token> <title>". Anything else, including
// indented continuation text from wrapped error detail, is skipped.

use super::{ParsedOutcome, ParsedResultMap};
use crate::config::ParserConfig;

pub(crate) fn scan_result_lines(text: &str, config: &ParserConfig) -> ParsedResultMap {
    let mut map = ParsedResultMap::new();

    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            continue;
        }

        let (symbol, rest) = match trimmed.split_once(char::is_whitespace) {
            Some(parts) => parts,
            None => continue,
        };

        if !is_result_symbol(symbol) {
            continue;
        }
        // Failure-block headers open with their own marker glyph and a
        // full test path; those belong to the block pass.
        if config.failure_markers.iter().any(|m| m == symbol) {
            continue;
        }

        let title = rest.trim();
        if title.is_empty() {
            continue;
        }

        let passed = config.pass_symbols.iter().any(|s| s == symbol);
        map.insert(
            title.to_string(),
            ParsedOutcome {
                passed,
                message: None,
            },
        );
    }

    map
}

/// A result symbol is a single non-alphanumeric glyph
fn is_result_symbol(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !c.is_alphanumeric(),
        _ => false,
    }
}
