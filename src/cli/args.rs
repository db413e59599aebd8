// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Output format for rendered results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Console,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console" => Ok(Self::Console),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Browser test-runner result parsing and test-tree correlation
#[derive(Parser, Debug)]
#[command(name = "testlens")]
#[command(author = "testlens team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Turn browser test-runner output into structured test results", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(short = 'c', long, global = true, default_value_t = false)]
    pub no_color: bool,

    /// Show current configuration and exit
    #[arg(long, default_value_t = false)]
    pub config: bool,

    /// Install shell completion (bash, zsh, fish, elvish, powershell)
    #[arg(long, value_name = "SHELL_TYPE", value_parser = ["bash", "zsh", "fish", "elvish", "powershell"])]
    pub completion: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse captured console output into per-test results
    Parse(ParseArgs),

    /// Assemble a report from a JSON-lines session event stream
    Report(ReportArgs),

    /// Annotate a discovered test tree with parsed outcomes
    Correlate(CorrelateArgs),
}

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Captured output file ("-" for stdin)
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "console")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout (json format only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Event stream file, one JSON event per line ("-" for stdin)
    pub input: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "console")]
    pub format: OutputFormat,

    /// Write output to a file instead of stdout (json format only)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CorrelateArgs {
    /// Discovered test tree (JSON)
    #[arg(long, value_name = "FILE")]
    pub tree: PathBuf,

    /// Captured output file ("-" for stdin)
    pub input: PathBuf,

    /// Refuse titles that match more than one tree node
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Write the annotated tree to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
