use crate::analyzer::manifest::formatter::{OutputFormat, format_report};
use crate::analyzer::manifest::{
    KubernetesValidator, ResourceKind, SchemaCatalog, ValidationReport, ValidatorOptions, strict,
};
use crate::config::types::{Config, ValidationConfig};
use crate::error::{ConfigError, KubedocError, Result};
use colored::Colorize;
use glob::Pattern;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

const SUPPORTED_EXTENSIONS: &[&str] = &["md", "markdown", "yaml", "yml"];

/// Validate a file, or every supported file under a directory.
///
/// Hidden files and directories are skipped, as are paths matching one of
/// the configured ignore globs (relative to `path`). Files are visited in
/// name order so reports are stable.
pub fn validate_path(path: &Path, config: &ValidationConfig) -> Result<ValidationReport> {
    if !path.exists() {
        return Err(KubedocError::PathNotFound(path.to_path_buf()));
    }

    let ignore = compile_patterns(&config.ignore_paths)?;
    let mut validator = KubernetesValidator::with_options(ValidatorOptions {
        strictness: config.strictness,
        include_untagged_blocks: config.include_untagged_blocks,
    });

    if path.is_file() {
        validator.validate_file(path)?;
        return Ok(validator.report());
    }

    let walker = WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry) && !is_ignored(entry, path, &ignore));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_supported(entry.path()) {
            continue;
        }
        if let Err(e) = validator.validate_file(entry.path()) {
            log::warn!("failed to validate {}: {}", entry.path().display(), e);
            validator.record_failure(entry.path(), e.to_string());
        }
    }

    Ok(validator.report())
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|e| {
                KubedocError::from(ConfigError::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

fn is_ignored(entry: &DirEntry, root: &Path, patterns: &[Pattern]) -> bool {
    let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
    patterns.iter().any(|p| p.matches_path(relative))
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Options from the `validate` command line, layered over the config file.
#[derive(Debug, Clone, Default)]
pub struct ValidateArgs {
    pub strict: bool,
    pub format: Option<OutputFormat>,
    pub fail_on_warnings: bool,
    pub include_untagged: bool,
    pub no_color: bool,
}

/// Run `validate` and print the report. Returns whether the run passed.
pub fn handle_validate(path: &Path, args: &ValidateArgs, config: &Config) -> Result<bool> {
    let mut validation = config.validation.clone();
    if args.strict {
        validation.strictness = crate::analyzer::manifest::Strictness::Strict;
    }
    validation.include_untagged_blocks |= args.include_untagged;
    let fail_on_warnings = validation.fail_on_warnings || args.fail_on_warnings;

    let report = validate_path(path, &validation)?;
    let format = args.format.unwrap_or(config.output.format);
    format_report(&report, format, config.output.color && !args.no_color)?;

    Ok(report.is_valid() && !(fail_on_warnings && report.has_warnings()))
}

/// Run `cron`. Returns whether the schedule is valid.
pub fn handle_cron(schedule: &str) -> bool {
    match strict::validate_cron_schedule(schedule) {
        Ok(()) => {
            println!("{} {}", "valid".green().bold(), schedule);
            true
        }
        Err(e) => {
            println!("{} {}", "invalid".red().bold(), e);
            false
        }
    }
}

/// Run `image`. Returns whether the image reference is valid.
pub fn handle_image(image: &str) -> bool {
    match strict::validate_image_tag(image) {
        Ok(()) => {
            println!("{} {}", "valid".green().bold(), image);
            true
        }
        Err(e) => {
            println!("{} {}", "invalid".red().bold(), e);
            false
        }
    }
}

/// Run `kinds`: print the catalog.
pub fn handle_kinds() {
    let catalog = SchemaCatalog::builtin();
    for kind in ResourceKind::ALL {
        if let Some(rule) = catalog.get(kind) {
            println!("{:<24} {}", kind.as_str().bold(), rule.expected_api_versions());
        }
    }
}
