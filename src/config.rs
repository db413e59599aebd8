// Configuration file handling
// The parser's glyph and terminator vocabulary tracks the external
// runner's console formatting, so it lives in configuration rather
// than in constants.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub correlate: CorrelateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Glyphs that mark a result line as passed
    #[serde(default = "default_pass_symbols")]
    pub pass_symbols: Vec<String>,

    /// Glyphs that open a failure-detail block
    #[serde(default = "default_failure_markers")]
    pub failure_markers: Vec<String>,

    /// Token separating path segments in failure-block headers
    #[serde(default = "default_path_separator")]
    pub path_separator: String,

    /// Browser/environment labels that terminate a failure block
    #[serde(default = "default_browser_labels")]
    pub browser_labels: Vec<String>,

    /// End-of-run markers that terminate a failure block
    #[serde(default = "default_finished_markers")]
    pub finished_markers: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            pass_symbols: default_pass_symbols(),
            failure_markers: default_failure_markers(),
            path_separator: default_path_separator(),
            browser_labels: default_browser_labels(),
            finished_markers: default_finished_markers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorrelateConfig {
    /// Refuse flat-map keys that match more than one node in a subtree
    #[serde(default)]
    pub strict: bool,
}

// Default values

fn default_pass_symbols() -> Vec<String> {
    vec![String::from("✓"), String::from("✔")]
}

fn default_failure_markers() -> Vec<String> {
    vec![String::from("❌"), String::from("✖")]
}

fn default_path_separator() -> String {
    String::from(">")
}

fn default_browser_labels() -> Vec<String> {
    vec![
        String::from("Chromium"),
        String::from("Firefox"),
        String::from("Webkit"),
    ]
}

fn default_finished_markers() -> Vec<String> {
    vec![String::from("Finished running tests")]
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. .testlensrc (current directory)
        // 2. ~/.testlensrc (home directory)
        // 3. .testlensrc.toml (current directory)
        // 4. ~/.testlensrc.toml (home directory)

        let cwd = std::env::current_dir().ok()?;
        let home = dirs::home_dir()?;

        let paths = [
            cwd.join(".testlensrc"),
            home.join(".testlensrc"),
            cwd.join(".testlensrc.toml"),
            home.join(".testlensrc.toml"),
        ];

        for path in &paths {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }

        None
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Option<Self> {
        toml::from_str(content).ok()
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
