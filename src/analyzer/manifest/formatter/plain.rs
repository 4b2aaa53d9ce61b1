//! Plain text formatter.

use crate::analyzer::manifest::session::ValidationReport;
use crate::analyzer::manifest::types::{ManifestResult, RunSummary};
use colored::Colorize;

/// Format a report as colored text.
pub fn format(report: &ValidationReport) -> String {
    render(report, true)
}

/// Format without colors (for non-TTY output).
pub fn format_no_color(report: &ValidationReport) -> String {
    render(report, false)
}

fn render(report: &ValidationReport, color: bool) -> String {
    let mut output = String::new();

    if report.results.is_empty() {
        output.push_str("No manifests found.\n");
        return output;
    }

    for result in &report.results {
        render_result(&mut output, result, color);
    }

    output.push('\n');
    render_summary(&mut output, &report.summary, color);
    output
}

fn render_result(output: &mut String, result: &ManifestResult, color: bool) {
    let status = match (result.valid, color) {
        (true, true) => "ok".green().bold().to_string(),
        (false, true) => "invalid".red().bold().to_string(),
        (true, false) => "ok".to_string(),
        (false, false) => "invalid".to_string(),
    };
    output.push_str(&format!("{}: {}\n", result.location(), status));

    for resource in &result.resources {
        for error in &resource.errors {
            output.push_str(&line("error", color, &resource.kind, &resource.name, error));
        }
        for warning in &resource.warnings {
            output.push_str(&line("warning", color, &resource.kind, &resource.name, warning));
        }
    }

    // Load-level errors belong to no resource.
    let resource_errors: usize = result.resources.iter().map(|r| r.errors.len()).sum();
    for error in result.errors.iter().skip(resource_errors) {
        let label = if color {
            "error".red().to_string()
        } else {
            "error".to_string()
        };
        output.push_str(&format!("  {}  {}\n", label, error));
    }
}

fn line(severity: &str, color: bool, kind: &str, name: &str, message: &str) -> String {
    let label = match (severity, color) {
        ("error", true) => severity.red().to_string(),
        (_, true) => severity.yellow().to_string(),
        _ => severity.to_string(),
    };
    let object = format!("{}/{}", kind, name);
    let object = if color {
        object.dimmed().to_string()
    } else {
        object
    };
    format!("  {}  {}  {}\n", label, object, message)
}

fn render_summary(output: &mut String, summary: &RunSummary, color: bool) {
    let text = format!(
        "{} manifest(s): {} valid, {} invalid, {} error(s), {} warning(s) ({:.1}% valid)\n",
        summary.total_files,
        summary.valid_files,
        summary.invalid_files,
        summary.total_errors,
        summary.total_warnings,
        summary.validation_rate,
    );
    if !color {
        output.push_str(&text);
    } else if summary.invalid_files > 0 {
        output.push_str(&text.red().bold().to_string());
    } else {
        output.push_str(&text.green().bold().to_string());
    }
}
