//! Fail-fast entry points.
//!
//! Each function returns `Ok` when the input passes and the first
//! violation as a typed `ValidationError` otherwise. They share the
//! catalog and rules used by `KubernetesValidator`, checked strictly.

use crate::analyzer::manifest::error::ValidationError;
use crate::analyzer::manifest::fields;
use crate::analyzer::manifest::lint::check_document;
use crate::analyzer::manifest::parser::load_first_document;
use crate::analyzer::manifest::schema::SchemaCatalog;
use crate::analyzer::manifest::types::Strictness;
use serde_yaml::Value;

/// Parse YAML and return the first non-empty document.
pub fn validate_yaml_syntax(content: &str) -> Result<Value, ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }
    Ok(load_first_document(content)?)
}

/// Check one parsed resource against the built-in catalog.
pub fn validate_kubernetes_resource(resource: &Value) -> Result<(), ValidationError> {
    let catalog = SchemaCatalog::builtin();
    let check = check_document(resource, &catalog, Strictness::Strict);
    match ValidationError::from_check(&check) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

pub fn validate_cron_schedule(schedule: &str) -> Result<(), ValidationError> {
    Ok(fields::validate_cron_schedule(schedule)?)
}

pub fn validate_image_tag(image: &str) -> Result<(), ValidationError> {
    Ok(fields::validate_image_tag(image)?)
}
