// Console sink - human-readable run summary

use super::ReportSink;
use crate::model::{Report, SuiteNode, TestNode, TestState};
use crate::parse::ParsedResultMap;
use anyhow::Result;
use console::style;

/// Console sink
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }

    fn print_suite(&self, suite: &SuiteNode, depth: usize) {
        let indent = "  ".repeat(depth);
        if !suite.title.is_empty() {
            println!("{}{}", indent, style(&suite.title).bold());
        }
        for test in &suite.tests {
            self.print_test(test, depth + 1);
        }
        for child in &suite.suites {
            self.print_suite(child, depth + 1);
        }
    }

    fn print_test(&self, test: &TestNode, depth: usize) {
        let indent = "  ".repeat(depth);
        let glyph = match test.state {
            TestState::Passed => style("✓").green(),
            TestState::Failed => style("✗").red(),
            TestState::Pending => style("-").yellow(),
        };
        let duration = match test.duration_ms {
            Some(ms) => format!(" ({}ms)", ms),
            None => String::new(),
        };
        println!("{}{} {}{}", indent, glyph, test.title, style(duration).dim());
    }

    fn print_failures(&self, suite: &SuiteNode) {
        for test in &suite.tests {
            if test.state == TestState::Failed {
                println!();
                println!("{} {}", style("✗").red(), style(&test.full_title).red());
                if let Some(error) = &test.error {
                    for line in error.message.lines() {
                        println!("    {}", line);
                    }
                    if let Some(stack) = &error.stack {
                        for line in stack.lines() {
                            println!("    {}", style(line).dim());
                        }
                    }
                }
            }
        }
        for child in &suite.suites {
            self.print_failures(child);
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for ConsoleSink {
    fn write_report(&self, report: &Report) -> Result<()> {
        self.print_suite(&report.root, 0);

        if report.stats.failures > 0 {
            println!();
            println!("{}", style("Failures:").red().bold());
            self.print_failures(&report.root);
        }

        let stats = &report.stats;
        println!();
        if stats.failures > 0 {
            println!(
                "{} {} failed, {} passed, {} pending ({} tests in {} suites)",
                style("FAILED").red().bold(),
                stats.failures,
                stats.passes,
                stats.pending,
                stats.tests,
                stats.suites,
            );
        } else {
            println!(
                "{} {} passed, {} pending ({} tests in {} suites)",
                style("PASSED").green().bold(),
                stats.passes,
                stats.pending,
                stats.tests,
                stats.suites,
            );
        }
        if let Some(ms) = stats.duration_ms {
            println!("Duration: {}ms", ms);
        }

        Ok(())
    }

    fn write_results(&self, results: &ParsedResultMap) -> Result<()> {
        // Map order is arbitrary; sort for stable output
        let mut titles: Vec<&String> = results.keys().collect();
        titles.sort();

        let mut failed = 0usize;
        for title in &titles {
            let outcome = &results[*title];
            if outcome.passed {
                println!("{} {}", style("✓").green(), title);
            } else {
                failed += 1;
                println!("{} {}", style("✗").red(), title);
                if let Some(message) = &outcome.message {
                    for line in message.lines() {
                        println!("    {}", line);
                    }
                }
            }
        }

        println!();
        if failed > 0 {
            println!(
                "{} {} failed, {} passed",
                style("FAILED").red().bold(),
                failed,
                titles.len() - failed,
            );
        } else {
            println!("{} {} passed", style("PASSED").green().bold(), titles.len());
        }

        Ok(())
    }
}
