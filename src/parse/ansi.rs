// ANSI escape stripping
// Runner output arrives colored and cursor-controlled; everything
// downstream matches on plain text.

use once_cell::sync::Lazy;
use regex::Regex;

static ANSI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    // CSI sequences, OSC sequences, then bare two-byte escapes
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-_]")
        .expect("ANSI pattern is valid")
});

/// Remove all ANSI escape/control sequences from the text
pub fn strip_ansi(text: &str) -> String {
    ANSI_PATTERN.replace_all(text, "").into_owned()
}
