// JSON sink - pretty JSON to a file or stdout

use super::ReportSink;
use crate::model::Report;
use crate::parse::ParsedResultMap;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// JSON sink
pub struct JsonSink {
    output_path: Option<PathBuf>,
}

impl JsonSink {
    /// Create a sink writing to the given file, or stdout when `None`
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    fn emit<T: Serialize>(&self, value: &T) -> Result<()> {
        match &self.output_path {
            Some(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create JSON report file: {}", path.display())
                })?;
                serde_json::to_writer_pretty(file, value)
                    .context("Failed to serialize results to JSON")?;
            }
            None => {
                let mut stdout = io::stdout().lock();
                serde_json::to_writer_pretty(&mut stdout, value)
                    .context("Failed to serialize results to JSON")?;
                writeln!(stdout)?;
            }
        }
        Ok(())
    }
}

impl ReportSink for JsonSink {
    fn write_report(&self, report: &Report) -> Result<()> {
        self.emit(report)
    }

    fn write_results(&self, results: &ParsedResultMap) -> Result<()> {
        self.emit(results)
    }
}
