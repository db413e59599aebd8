// Failure-block pass
// A block opens with a marker glyph and a full test path, carries
// free-form message lines, and closes at the first terminator: a
// browser/environment label, a finished marker, the next block header,
// or end of input. Truncated trailing blocks are still captured.

use crate::config::ParserConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FailureBlock {
    /// Full separator-joined test path from the header line
    pub path: String,
    /// Trimmed message body; empty when the block had no detail lines
    pub body: String,
}

pub(crate) fn scan_failure_blocks(text: &str, config: &ParserConfig) -> Vec<FailureBlock> {
    let mut blocks = Vec::new();
    let lines: Vec<&str> = text.lines().collect();

    let mut i = 0;
    while i < lines.len() {
        let Some(path) = block_header(lines[i], config) else {
            i += 1;
            continue;
        };

        let mut body_lines: Vec<&str> = Vec::new();
        i += 1;
        while i < lines.len() && !is_terminator(lines[i], config) {
            body_lines.push(lines[i]);
            i += 1;
        }
        // A header acting as terminator is not consumed; the outer loop
        // picks it up as the next block.

        blocks.push(FailureBlock {
            path,
            body: body_lines.join("\n").trim().to_string(),
        });
    }

    blocks
}

fn block_header(line: &str, config: &ParserConfig) -> Option<String> {
    let trimmed = line.trim_start();
    for marker in &config.failure_markers {
        if let Some(rest) = trimmed.strip_prefix(marker.as_str()) {
            let path = rest.trim();
            if !path.is_empty() {
                return Some(path.to_string());
            }
        }
    }
    None
}

fn is_terminator(line: &str, config: &ParserConfig) -> bool {
    let trimmed = line.trim_start();
    block_header(line, config).is_some()
        || config
            .browser_labels
            .iter()
            .any(|label| trimmed.starts_with(label.as_str()))
        || config
            .finished_markers
            .iter()
            .any(|marker| trimmed.starts_with(marker.as_str()))
}
