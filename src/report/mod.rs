// Report module - rendering of parsed and assembled results

pub mod console;
pub mod json;

pub use console::ConsoleSink;
pub use json::JsonSink;

use crate::model::Report;
use crate::parse::ParsedResultMap;
use anyhow::Result;

/// Sink for completed run artifacts
pub trait ReportSink {
    /// Render a structured report
    fn write_report(&self, report: &Report) -> Result<()>;

    /// Render a parsed console-output map
    fn write_results(&self, results: &ParsedResultMap) -> Result<()>;
}
