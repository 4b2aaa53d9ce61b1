//! Core types for the manifest validator.
//!
//! - `Severity` - whether a finding fails the manifest or only warns
//! - `RuleCode` - identifiers for the individual checks
//! - `Finding` - a single message produced while checking a resource
//! - `ValidationResult` - per-resource accumulator
//! - `ManifestResult` - per-manifest aggregate (one code block or one file)
//! - `RunSummary` - counts across every manifest a session has seen

use crate::analyzer::docs::TaskMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Severity of a finding.
///
/// Only errors affect `ManifestResult::valid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Schema violation; the manifest is invalid.
    Error,
    /// Style or convention issue.
    Warning,
}

impl Severity {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How findings are surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Stop at the first error and return it as a typed `ValidationError`.
    /// Unusual API versions, unknown kinds and malformed image references are errors.
    Strict,
    /// Accumulate every finding into the result; never return `Err`.
    #[default]
    Tolerant,
}

impl Strictness {
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict)
    }
}

/// Identifier of the check that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCode {
    NotAMapping,
    MissingKind,
    UnknownKind,
    ApiVersion,
    RequiredField,
    Metadata,
    ResourceName,
    Namespace,
    Labels,
    InvalidSpec,
    Replicas,
    Selector,
    PodTemplate,
    ServicePorts,
    ServiceType,
    Containers,
    ContainerImage,
    ContainerResources,
    CronSchedule,
    JobTemplate,
    Capacity,
    AccessModes,
    DeprecatedField,
}

impl RuleCode {
    /// Get the kebab-case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotAMapping => "not-a-mapping",
            Self::MissingKind => "missing-kind",
            Self::UnknownKind => "unknown-kind",
            Self::ApiVersion => "api-version",
            Self::RequiredField => "required-field",
            Self::Metadata => "metadata",
            Self::ResourceName => "resource-name",
            Self::Namespace => "namespace",
            Self::Labels => "labels",
            Self::InvalidSpec => "invalid-spec",
            Self::Replicas => "replicas",
            Self::Selector => "selector",
            Self::PodTemplate => "pod-template",
            Self::ServicePorts => "service-ports",
            Self::ServiceType => "service-type",
            Self::Containers => "containers",
            Self::ContainerImage => "container-image",
            Self::ContainerResources => "container-resources",
            Self::CronSchedule => "cron-schedule",
            Self::JobTemplate => "job-template",
            Self::Capacity => "capacity",
            Self::AccessModes => "access-modes",
            Self::DeprecatedField => "deprecated-field",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single message produced while checking one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule: RuleCode,
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(rule: RuleCode, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(rule: RuleCode, message: impl Into<String>) -> Self {
        Self {
            rule,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Validation outcome for one Kubernetes resource.
///
/// Built append-only while the checks run; once an error is recorded it
/// is never retracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// The resource kind, or `"Unknown"` when it could not be determined.
    pub kind: String,
    /// `metadata.name`, or `"Unnamed"`.
    pub name: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Split findings into the error and warning lists, keeping their order.
    pub fn from_findings(
        kind: impl Into<String>,
        name: impl Into<String>,
        findings: Vec<Finding>,
    ) -> Self {
        let mut result = Self::new(kind, name);
        for finding in findings {
            match finding.severity {
                Severity::Error => result.errors.push(finding.message),
                Severity::Warning => result.warnings.push(finding.message),
            }
        }
        result
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validation outcome for one manifest: a YAML code block or a `.yaml` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestResult {
    /// True iff the stream loaded cleanly and no resource has errors.
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub resources: Vec<ValidationResult>,
    /// File the manifest was read from, when validated through a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<PathBuf>,
    /// 1-based index of the code block inside a markdown file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block: Option<usize>,
    /// Task metadata, on the document-level result of a markdown file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TaskMetadata>,
}

impl ManifestResult {
    /// Aggregate resource results in document order, followed by the
    /// load-level error if the stream failed to parse.
    pub fn from_resources(resources: Vec<ValidationResult>, load_error: Option<String>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for resource in &resources {
            errors.extend(resource.errors.iter().cloned());
            warnings.extend(resource.warnings.iter().cloned());
        }
        if let Some(err) = load_error {
            errors.push(err);
        }

        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            resources,
            source_file: None,
            block: None,
            metadata: None,
        }
    }

    /// A manifest that failed outright with a single error.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::from_resources(Vec::new(), Some(message.into()))
    }

    /// Tag the result with the file it came from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_file = Some(path.into());
        self
    }

    /// Tag the result with its markdown code block index (1-based).
    pub fn with_block(mut self, block: usize) -> Self {
        self.block = Some(block);
        self
    }

    /// Attach the task metadata of the markdown file.
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Human-readable location, e.g. `docs/task.md (block 2)`.
    pub fn location(&self) -> String {
        let file = self
            .source_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());
        match self.block {
            Some(block) => format!("{} (block {})", file, block),
            None => file,
        }
    }
}

/// Counts across every manifest validated by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_files: usize,
    pub valid_files: usize,
    pub invalid_files: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    /// Percentage of valid manifests; `0.0` when nothing was validated.
    pub validation_rate: f64,
}

impl RunSummary {
    pub fn from_results(results: &[ManifestResult]) -> Self {
        let total_files = results.len();
        let valid_files = results.iter().filter(|r| r.valid).count();
        let total_errors = results.iter().map(|r| r.errors.len()).sum();
        let total_warnings = results.iter().map(|r| r.warnings.len()).sum();
        let validation_rate = if total_files > 0 {
            valid_files as f64 / total_files as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_files,
            valid_files,
            invalid_files: total_files - valid_files,
            total_errors,
            total_warnings,
            validation_rate,
        }
    }
}
