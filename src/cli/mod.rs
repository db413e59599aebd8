// CLI module

pub mod args;

pub use args::{Cli, Commands, CorrelateArgs, OutputFormat, ParseArgs, ReportArgs};
