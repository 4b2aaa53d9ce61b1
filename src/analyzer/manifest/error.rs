//! Typed failures for the strict (fail-fast) contract.

use crate::analyzer::ansible::PlaybookError;
use crate::analyzer::dockerfile::DockerfileError;
use crate::analyzer::manifest::fields::{CronError, ImageError};
use crate::analyzer::manifest::lint::ResourceCheck;
use crate::analyzer::manifest::parser::LoadError;
use crate::analyzer::manifest::types::RuleCode;

/// First violation found by a strict check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("YAML content cannot be empty")]
    EmptyContent,
    #[error("Invalid YAML syntax: {0}")]
    YamlSyntax(String),
    #[error("No valid YAML content found")]
    NoDocuments,
    #[error("Missing required field: kind")]
    MissingKind,
    #[error("Unsupported resource kind: {0}")]
    UnsupportedKind(String),
    /// Any other rule violation on a resource.
    #[error("{message}")]
    Violation {
        kind: String,
        rule: RuleCode,
        message: String,
    },
    #[error(transparent)]
    Cron(#[from] CronError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Dockerfile(#[from] DockerfileError),
    #[error(transparent)]
    Playbook(#[from] PlaybookError),
}

impl ValidationError {
    /// The first error recorded for a resource, if any.
    pub fn from_check(check: &ResourceCheck) -> Option<Self> {
        let finding = check.first_error()?;
        Some(match finding.rule {
            RuleCode::MissingKind => Self::MissingKind,
            RuleCode::UnknownKind => Self::UnsupportedKind(check.kind.clone()),
            rule => Self::Violation {
                kind: check.kind.clone(),
                rule,
                message: finding.message.clone(),
            },
        })
    }

    /// Rule that produced the error, when it came from a resource check.
    pub fn rule(&self) -> Option<RuleCode> {
        match self {
            Self::MissingKind => Some(RuleCode::MissingKind),
            Self::UnsupportedKind(_) => Some(RuleCode::UnknownKind),
            Self::Violation { rule, .. } => Some(*rule),
            Self::Cron(_) => Some(RuleCode::CronSchedule),
            Self::Image(_) => Some(RuleCode::ContainerImage),
            _ => None,
        }
    }
}

impl From<LoadError> for ValidationError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Syntax(diagnostic) => Self::YamlSyntax(diagnostic),
            LoadError::Empty => Self::NoDocuments,
        }
    }
}
