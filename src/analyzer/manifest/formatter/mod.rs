//! Output formatters for validation reports.

pub mod json;
pub mod plain;

use crate::analyzer::manifest::session::ValidationReport;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text, colored when enabled.
    #[default]
    Plain,
    /// JSON output.
    Json,
}

/// Format a report to a string.
pub fn format_report_to_string(
    report: &ValidationReport,
    format: OutputFormat,
    color: bool,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Plain if color => plain::format(report),
        OutputFormat::Plain => plain::format_no_color(report),
        OutputFormat::Json => json::format(report)?,
    })
}

/// Format and print a report.
pub fn format_report(report: &ValidationReport, format: OutputFormat, color: bool) -> Result<()> {
    print!("{}", format_report_to_string(report, format, color)?);
    Ok(())
}
