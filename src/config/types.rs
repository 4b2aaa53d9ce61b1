use crate::analyzer::manifest::Strictness;
use crate::analyzer::manifest::formatter::OutputFormat;
use serde::{Deserialize, Serialize};

/// Main configuration structure, read from `.kubedoc.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub strictness: Strictness,
    /// Also validate untagged code blocks that look like YAML.
    pub include_untagged_blocks: bool,
    /// Glob patterns, matched against paths relative to the validated root.
    pub ignore_paths: Vec<String>,
    /// Treat warnings as failures for the exit code.
    pub fail_on_warnings: bool,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Plain,
            color: true,
        }
    }
}
