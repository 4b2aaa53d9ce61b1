//! JSON formatter.

use crate::analyzer::manifest::session::ValidationReport;

/// Format a report as pretty-printed JSON.
pub fn format(report: &ValidationReport) -> serde_json::Result<String> {
    let mut output = serde_json::to_string_pretty(report)?;
    output.push('\n');
    Ok(output)
}
