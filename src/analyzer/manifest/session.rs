//! Validator session: runs manifests through the checks and keeps every
//! result for the run summary.

use crate::analyzer::ansible::{is_playbook, validate_playbook};
use crate::analyzer::docs::check_markdown;
use crate::analyzer::dockerfile::validate_dockerfile;
use crate::analyzer::manifest::error::ValidationError;
use crate::analyzer::manifest::lint::validate_content;
use crate::analyzer::manifest::parser::load_documents_partial;
use crate::analyzer::manifest::schema::SchemaCatalog;
use crate::analyzer::manifest::types::{
    ManifestResult, RunSummary, Strictness, ValidationResult,
};
use crate::analyzer::markdown::{CodeBlock, code_blocks, is_likely_yaml};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Options for a validator session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorOptions {
    pub strictness: Strictness,
    /// Validate untagged markdown blocks that look like YAML.
    pub include_untagged_blocks: bool,
}

/// Per-file results plus the summary over all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<ManifestResult>,
    pub summary: RunSummary,
}

impl ValidationReport {
    pub fn new(results: Vec<ManifestResult>) -> Self {
        let summary = RunSummary::from_results(&results);
        Self { results, summary }
    }

    pub fn is_valid(&self) -> bool {
        self.summary.invalid_files == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.summary.total_warnings > 0
    }
}

/// Validates Kubernetes manifests and accumulates the results.
///
/// Accumulation is append-only for the lifetime of the session. A session
/// is not internally synchronized; callers sharing one across threads must
/// serialize access themselves.
#[derive(Debug, Clone)]
pub struct KubernetesValidator {
    options: ValidatorOptions,
    catalog: Arc<SchemaCatalog>,
    results: Vec<ManifestResult>,
}

impl Default for KubernetesValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl KubernetesValidator {
    /// A tolerant session over the built-in catalog.
    pub fn new() -> Self {
        Self::with_options(ValidatorOptions::default())
    }

    /// A strict session over the built-in catalog.
    pub fn strict() -> Self {
        Self::with_options(ValidatorOptions {
            strictness: Strictness::Strict,
            ..ValidatorOptions::default()
        })
    }

    pub fn with_options(options: ValidatorOptions) -> Self {
        Self::with_catalog(options, SchemaCatalog::builtin())
    }

    pub fn with_catalog(options: ValidatorOptions, catalog: Arc<SchemaCatalog>) -> Self {
        Self {
            options,
            catalog,
            results: Vec::new(),
        }
    }

    pub fn options(&self) -> ValidatorOptions {
        self.options
    }

    pub fn strictness(&self) -> Strictness {
        self.options.strictness
    }

    /// Validate a YAML stream.
    ///
    /// Follows the session's strictness: tolerant sessions always return
    /// `Ok`; strict sessions return the first violation as `Err`. Either
    /// way the outcome is recorded for the summary.
    pub fn validate(&mut self, content: &str) -> std::result::Result<ManifestResult, ValidationError> {
        match self.evaluate(content) {
            Ok(result) => Ok(self.record(result)),
            Err(err) => {
                self.record(ManifestResult::failed(err.to_string()));
                Err(err)
            }
        }
    }

    /// Validate a YAML stream, folding a strict failure into the result.
    /// Never fails.
    pub fn validate_manifest(&mut self, content: &str) -> ManifestResult {
        let result = self.evaluate_folded(content);
        self.record(result)
    }

    /// Validate a markdown document: one document-level result (title,
    /// sections, formatting, links, task metadata) followed by one result
    /// per validated code block.
    ///
    /// `yaml`/`yml` blocks are checked as manifests, or as Ansible
    /// playbooks when their first document is a list. `dockerfile` blocks
    /// get the Dockerfile checks. Other blocks are skipped.
    pub fn validate_markdown(&mut self, content: &str, source: Option<&Path>) -> Vec<ManifestResult> {
        let mut document = check_markdown(content).into_result();
        if let Some(source) = source {
            document = document.with_source(source);
        }
        let mut results = vec![self.record(document)];

        for (index, block) in code_blocks(content).iter().enumerate() {
            let Some(result) = self.evaluate_block(block) else {
                continue;
            };
            let mut result = result.with_block(index + 1);
            if let Some(source) = source {
                result = result.with_source(source);
            }
            results.push(self.record(result));
        }

        log::debug!(
            "validated {} block(s) from {}",
            results.len(),
            source.map_or_else(|| "<input>".to_string(), |p| p.display().to_string())
        );
        results
    }

    /// Validate a file: markdown files per block, `.yaml`/`.yml` files as a
    /// single manifest. Other extensions yield no results.
    pub fn validate_file(&mut self, path: &Path) -> Result<Vec<ManifestResult>> {
        let content = fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let results = match extension.as_str() {
            "md" | "markdown" => self.validate_markdown(&content, Some(path)),
            "yaml" | "yml" => {
                let result = self.evaluate_yaml(&content).with_source(path);
                vec![self.record(result)]
            }
            _ => {
                log::debug!("skipping {}: unsupported extension", path.display());
                Vec::new()
            }
        };
        Ok(results)
    }

    /// Record a file that could not be validated at all, so it counts as
    /// invalid in the summary.
    pub fn record_failure(&mut self, path: &Path, message: impl Into<String>) -> ManifestResult {
        self.record(ManifestResult::failed(message).with_source(path))
    }

    /// Every result recorded so far, in order.
    pub fn results(&self) -> &[ManifestResult] {
        &self.results
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_results(&self.results)
    }

    pub fn report(&self) -> ValidationReport {
        ValidationReport::new(self.results.clone())
    }

    fn record(&mut self, result: ManifestResult) -> ManifestResult {
        self.results.push(result.clone());
        result
    }

    fn evaluate(&self, content: &str) -> std::result::Result<ManifestResult, ValidationError> {
        validate_content(content, &self.catalog, self.options.strictness)
    }

    fn evaluate_folded(&self, content: &str) -> ManifestResult {
        self.evaluate(content)
            .unwrap_or_else(|err| ManifestResult::failed(err.to_string()))
    }

    fn evaluate_block(&self, block: &CodeBlock) -> Option<ManifestResult> {
        if block.is_dockerfile() {
            return Some(single_check("Dockerfile", validate_dockerfile(&block.code)));
        }

        let untagged_yaml = self.options.include_untagged_blocks
            && block.is_untagged()
            && is_likely_yaml(&block.code);
        if block.is_yaml() || untagged_yaml {
            return Some(self.evaluate_yaml(&block.code));
        }

        None
    }

    /// Kubernetes manifest, or Ansible playbook when the first document is
    /// a list.
    fn evaluate_yaml(&self, content: &str) -> ManifestResult {
        let outcome = load_documents_partial(content);
        match outcome.documents.first() {
            Some(first) if is_playbook(first) && outcome.error.is_none() => {
                single_check("Playbook", validate_playbook(first))
            }
            _ => self.evaluate_folded(content),
        }
    }
}

/// Wrap a single pass/fail check as a one-resource manifest result.
fn single_check<E: std::fmt::Display>(kind: &str, outcome: std::result::Result<(), E>) -> ManifestResult {
    let mut resource = ValidationResult::new(kind, kind);
    if let Err(err) = outcome {
        resource.errors.push(err.to_string());
    }
    ManifestResult::from_resources(vec![resource], None)
}
