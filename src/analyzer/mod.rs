//! # Analyzer Module
//!
//! Checks for the snippets found in documentation:
//! - Kubernetes manifests (`manifest`)
//! - Guide structure, formatting, links and task metadata (`docs`)
//! - Fenced code block extraction from markdown (`markdown`)
//! - Dockerfile structure (`dockerfile`)
//! - Ansible playbook shape (`ansible`)

pub mod ansible;
pub mod dockerfile;
pub mod docs;
pub mod manifest;
pub mod markdown;

pub use docs::{DocumentCheck, TaskMetadata, check_markdown, extract_task_metadata};
pub use manifest::{
    KubernetesValidator, ManifestResult, Strictness, ValidationError, ValidationReport,
    ValidationResult,
};
pub use markdown::{CodeBlock, extract_code_blocks, extract_yaml_blocks};
