//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) with specialized
//! support for diagnostic reports.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use doxport_core::{Diagnostic, DiagnosticReport, Severity};
use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use tracing::trace;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a diagnostic report with grouping by severity
    fn format_diagnostic_report(&self, report: &DiagnosticReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Human => {
                // For human format, use pretty JSON as fallback
                Ok(serde_json::to_string_pretty(value)?)
            }
        }
    }

    fn format_diagnostic_report(&self, report: &DiagnosticReport) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(report)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            OutputFormat::Human => format_diagnostic_report_human(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    #[allow(dead_code)]
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[allow(dead_code)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        verbose: u8,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&format!("{} {}", "ℹ".blue(), message))
            } else {
                self.writeln(&format!("INFO: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&message.green().to_string())
            } else {
                self.writeln(message)
            }
        } else {
            Ok(())
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&message.yellow().to_string())
            } else {
                self.writeln(&format!("WARNING: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write an error message
    #[allow(dead_code)]
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format == OutputFormat::Human {
            if self.use_color {
                self.writeln(&message.red().to_string())
            } else {
                self.writeln(&format!("ERROR: {}", message))
            }
        } else {
            Ok(())
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.format == OutputFormat::Human {
            self.writeln("")?;
            if self.use_color {
                self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
            } else {
                self.writeln(&format!("=== {} ===", title))
            }
        } else {
            Ok(())
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        trace!(
            "Outputting data: {}",
            serde_json::to_string(value).unwrap_or_else(|_| "[failed to serialize]".to_string())
        );

        let formatted = self.format.format(value)?;

        if self.format == OutputFormat::Human {
            self.writeln(&formatted)
        } else {
            self.write(&formatted)
        }
    }

    /// Write a diagnostic report with specialized formatting
    pub fn diagnostic_report(&mut self, report: &DiagnosticReport) -> Result<()> {
        let formatted = self.format.format_diagnostic_report(report)?;
        self.writeln(&formatted)
    }
}

/// Format a diagnostic report for human reading
fn format_diagnostic_report_human(report: &DiagnosticReport) -> Result<String> {
    let mut output = String::new();

    if report.is_clean() {
        output.push_str("No fragments were dropped during export\n");
        return Ok(output);
    }

    output.push_str(&format!(
        "Diagnostic Report - {} dropped fragment(s)\n\n",
        report.summary.total
    ));

    // Summary by code
    output.push_str("Summary by code:\n");
    let mut codes: Vec<_> = report.summary.by_code.iter().collect();
    codes.sort();
    for (code, count) in codes {
        output.push_str(&format!("  • {}: {}\n", code, count));
    }
    output.push('\n');

    // Group items by severity for better readability
    let mut by_severity: HashMap<Severity, Vec<&Diagnostic>> = HashMap::new();
    for item in &report.items {
        by_severity.entry(item.severity).or_default().push(item);
    }

    for severity in [Severity::Warning, Severity::Info] {
        if let Some(items) = by_severity.get(&severity) {
            let label = match severity {
                Severity::Warning => "Warnings",
                Severity::Info => "Notes",
            };

            output.push_str(&format!("{}:\n", label));
            for item in items {
                output.push_str(&format!("  Path: {}\n", item.path));
                output.push_str(&format!("  Variant: {}\n", item.variant));
                output.push_str(&format!("  Message: {}\n", item.message));
                output.push('\n');
            }
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> DiagnosticReport {
        let mut tracker = doxport_core::project::DiagnosticTracker::new();
        tracker.record_declaration("pkg/Alias", "typeAlias");
        tracker.record_bound("pkg/Holder", "dynamic");
        tracker.build_report()
    }

    #[test]
    fn test_format_report_as_json_round_trips() {
        let report = sample_report();
        let json = OutputFormat::Json.format_diagnostic_report(&report).unwrap();
        let parsed: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_human_report_groups_by_severity() {
        let report = sample_report();
        let text = OutputFormat::Human
            .format_diagnostic_report(&report)
            .unwrap();
        assert!(text.contains("2 dropped fragment(s)"));
        assert!(text.contains("UnrecognizedDeclaration: 1"));
        assert!(text.contains("Warnings:"));
        assert!(text.contains("Notes:"));
        assert!(text.contains("pkg/Alias"));
    }

    #[test]
    fn test_human_report_clean() {
        let report = DiagnosticReport::default();
        let text = OutputFormat::Human
            .format_diagnostic_report(&report)
            .unwrap();
        assert!(text.contains("No fragments were dropped"));
    }

    #[test]
    fn test_writer_respects_quiet() {
        let mut writer =
            OutputWriter::with_writer(OutputFormat::Human, false, true, 0, Box::new(Vec::new()));
        // Quiet mode drops info and success messages without error
        writer.info("hidden").unwrap();
        writer.success("hidden").unwrap();
    }
}
