//! Check orchestration for manifests.
//!
//! A manifest is loaded into documents; each document is classified by
//! kind and then run through, in order:
//!
//! 1. API version presence and compatibility
//! 2. required top-level fields from the schema catalog
//! 3. metadata (name, namespace, labels)
//! 4. the kind's structural rule over `spec`
//! 5. deprecated field paths
//!
//! Documents are independent of each other.

use crate::analyzer::manifest::error::ValidationError;
use crate::analyzer::manifest::kinds::{Classification, ResourceKind, classify, resource_name};
use crate::analyzer::manifest::parser::value::{display, is_falsy, type_name};
use crate::analyzer::manifest::parser::{load_documents, load_documents_partial};
use crate::analyzer::manifest::rules::deprecated::check_deprecated_fields;
use crate::analyzer::manifest::rules::metadata::check_metadata;
use crate::analyzer::manifest::rules::{RuleContext, rule_for};
use crate::analyzer::manifest::schema::{SchemaCatalog, SchemaRule};
use crate::analyzer::manifest::types::{
    Finding, ManifestResult, RuleCode, Strictness, ValidationResult,
};
use serde_yaml::{Mapping, Value};

const UNKNOWN_KIND: &str = "Unknown";
const UNNAMED: &str = "Unnamed";

/// Fields with a dedicated check of their own; the required-field pass
/// skips them so each gap is reported once.
const DEDICATED_FIELDS: &[&str] = &["apiVersion", "kind", "metadata"];

/// Findings for one resource, before they are split into a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCheck {
    pub kind: String,
    pub name: String,
    pub findings: Vec<Finding>,
}

impl ResourceCheck {
    pub fn first_error(&self) -> Option<&Finding> {
        self.findings.iter().find(|f| f.is_error())
    }

    pub fn is_valid(&self) -> bool {
        self.first_error().is_none()
    }

    pub fn into_result(self) -> ValidationResult {
        ValidationResult::from_findings(self.kind, self.name, self.findings)
    }
}

/// Run every check against one loaded document.
pub fn check_document(
    document: &Value,
    catalog: &SchemaCatalog,
    strictness: Strictness,
) -> ResourceCheck {
    let mut ctx = RuleContext::new(strictness);

    let (kind, name) = match classify(document) {
        Classification::NotAMapping { found } => {
            ctx.error(
                RuleCode::NotAMapping,
                format!("Resource must be a mapping, found {}", found),
            );
            (UNKNOWN_KIND.to_string(), UNNAMED.to_string())
        }
        Classification::MissingKind => {
            ctx.error(RuleCode::MissingKind, "Missing required field: kind");
            (UNKNOWN_KIND.to_string(), UNNAMED.to_string())
        }
        Classification::Known { kind, resource } => {
            match catalog.get(kind) {
                Some(schema) => check_known(kind, schema, document, resource, &mut ctx),
                None => check_unknown(kind.as_str(), resource, &mut ctx),
            }
            (kind.as_str().to_string(), resource_name(resource))
        }
        Classification::Unknown { kind, resource } => {
            check_unknown(&kind, resource, &mut ctx);
            (kind.into_owned(), resource_name(resource))
        }
    };

    log::trace!(
        "checked {}/{}: {} finding(s)",
        kind,
        name,
        ctx.findings().len()
    );

    ResourceCheck {
        kind,
        name,
        findings: ctx.into_findings(),
    }
}

fn check_known(
    kind: ResourceKind,
    schema: &SchemaRule,
    document: &Value,
    resource: &Mapping,
    ctx: &mut RuleContext,
) {
    check_api_version(kind.as_str(), Some(schema), resource, ctx);

    for field in schema.required_fields {
        if !DEDICATED_FIELDS.contains(field) && !resource.contains_key(*field) {
            ctx.error(
                RuleCode::RequiredField,
                format!("Missing required field '{}' for {}", field, kind),
            );
        }
    }

    check_metadata(resource, ctx);

    if let Some(spec) = resource.get("spec") {
        match spec.as_mapping() {
            Some(spec) => rule_for(kind).check(kind, spec, ctx),
            None => ctx.error(
                RuleCode::InvalidSpec,
                format!("spec must be a mapping, found {}", type_name(spec)),
            ),
        }
    }

    check_deprecated_fields(document, schema.deprecated_fields, ctx);
}

/// Kinds outside the catalog get metadata checks only.
fn check_unknown(kind: &str, resource: &Mapping, ctx: &mut RuleContext) {
    log::debug!("no schema for kind '{}', skipping kind-specific checks", kind);
    ctx.advisory(
        RuleCode::UnknownKind,
        format!("Unsupported resource kind: {}", kind),
    );
    check_api_version(kind, None, resource, ctx);
    check_metadata(resource, ctx);
}

fn check_api_version(
    kind: &str,
    schema: Option<&SchemaRule>,
    resource: &Mapping,
    ctx: &mut RuleContext,
) {
    let strict = ctx.strictness().is_strict();

    let version = match resource.get("apiVersion") {
        Some(version) if !is_falsy(version) => version,
        _ => {
            let message = match schema {
                Some(schema) if strict => format!(
                    "Missing 'apiVersion' field. Expected one of: {}",
                    schema.expected_api_versions()
                ),
                _ => "Missing 'apiVersion' field".to_string(),
            };
            ctx.error(RuleCode::ApiVersion, message);
            return;
        }
    };

    let Some(schema) = schema else {
        return;
    };

    let accepted = version
        .as_str()
        .is_some_and(|v| schema.accepts_api_version(v));
    if accepted {
        return;
    }

    let version = display(version);
    let expected = schema.expected_api_versions();
    if strict {
        ctx.error(
            RuleCode::ApiVersion,
            format!(
                "Invalid apiVersion for {}: {}. Expected one of: {}",
                kind, version, expected
            ),
        );
    } else {
        ctx.warning(
            RuleCode::ApiVersion,
            format!(
                "Unusual API version '{}' for {}. Expected one of: {}",
                version, kind, expected
            ),
        );
    }
}

/// Validate a YAML stream as one manifest.
///
/// Tolerant checking keeps the documents parsed before a syntax error,
/// reports the error once and never returns `Err`. Strict checking fails
/// the whole stream on a syntax error and returns the first violation.
pub fn validate_content(
    content: &str,
    catalog: &SchemaCatalog,
    strictness: Strictness,
) -> Result<ManifestResult, ValidationError> {
    match strictness {
        Strictness::Tolerant => Ok(validate_tolerant(content, catalog)),
        Strictness::Strict => validate_strict(content, catalog),
    }
}

fn validate_tolerant(content: &str, catalog: &SchemaCatalog) -> ManifestResult {
    let outcome = load_documents_partial(content);
    log::debug!("loaded {} document(s)", outcome.documents.len());

    let resources = outcome
        .documents
        .iter()
        .map(|document| check_document(document, catalog, Strictness::Tolerant).into_result())
        .collect();
    let load_error = outcome
        .error
        .map(|err| format!("YAML parsing error: {}", err));

    ManifestResult::from_resources(resources, load_error)
}

fn validate_strict(
    content: &str,
    catalog: &SchemaCatalog,
) -> Result<ManifestResult, ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    let documents = load_documents(content)?;
    if documents.is_empty() {
        return Err(ValidationError::NoDocuments);
    }
    log::debug!("loaded {} document(s)", documents.len());

    let mut resources = Vec::with_capacity(documents.len());
    for document in &documents {
        let check = check_document(document, catalog, Strictness::Strict);
        if let Some(err) = ValidationError::from_check(&check) {
            log::debug!("strict check failed on {}/{}: {}", check.kind, check.name, err);
            return Err(err);
        }
        resources.push(check.into_result());
    }

    Ok(ManifestResult::from_resources(resources, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(yaml: &str, strictness: Strictness) -> ResourceCheck {
        let doc: Value = serde_yaml::from_str(yaml).unwrap();
        check_document(&doc, &SchemaCatalog::builtin(), strictness)
    }

    fn messages(check: &ResourceCheck) -> Vec<&str> {
        check.findings.iter().map(|f| f.message.as_str()).collect()
    }

    const POD: &str = "
apiVersion: v1
kind: Pod
metadata:
  name: web
spec:
  containers:
    - name: web
      image: nginx:1.25
";

    #[test]
    fn test_valid_pod() {
        let check = check(POD, Strictness::Tolerant);
        assert!(check.findings.is_empty(), "{:?}", check.findings);
        assert_eq!(check.kind, "Pod");
        assert_eq!(check.name, "web");
    }

    #[test]
    fn test_missing_kind_stops() {
        let check = check("apiVersion: v1\nmetadata: {name: Bad_Name}\nspec: 3\n", Strictness::Tolerant);
        assert_eq!(messages(&check), vec!["Missing required field: kind"]);
        assert_eq!(check.kind, "Unknown");
        assert_eq!(check.name, "Unnamed");
    }

    #[test]
    fn test_not_a_mapping() {
        let check = check("- a\n- b\n", Strictness::Tolerant);
        assert_eq!(messages(&check), vec!["Resource must be a mapping, found list"]);
    }

    #[test]
    fn test_unknown_kind_tolerant() {
        let check = check(
            "apiVersion: example.com/v1\nkind: Widget\nmetadata:\n  name: w\n",
            Strictness::Tolerant,
        );
        assert_eq!(messages(&check), vec!["Unsupported resource kind: Widget"]);
        assert!(check.is_valid());
    }

    #[test]
    fn test_unknown_kind_strict() {
        let check = check("apiVersion: v1\nkind: Widget\nmetadata: {name: w}\n", Strictness::Strict);
        assert_eq!(
            ValidationError::from_check(&check),
            Some(ValidationError::UnsupportedKind("Widget".to_string()))
        );
    }

    #[test]
    fn test_unusual_api_version() {
        let yaml = POD.replace("apiVersion: v1", "apiVersion: apps/v1");
        let tolerant = check(&yaml, Strictness::Tolerant);
        assert!(tolerant.is_valid());
        assert_eq!(
            messages(&tolerant),
            vec!["Unusual API version 'apps/v1' for Pod. Expected one of: v1"]
        );

        let strict = check(&yaml, Strictness::Strict);
        assert_eq!(
            strict.first_error().map(|f| f.message.as_str()),
            Some("Invalid apiVersion for Pod: apps/v1. Expected one of: v1")
        );
    }

    #[test]
    fn test_missing_api_version() {
        let yaml = POD.replace("apiVersion: v1\n", "");
        assert_eq!(
            messages(&check(&yaml, Strictness::Tolerant)),
            vec!["Missing 'apiVersion' field"]
        );
        assert_eq!(
            messages(&check(&yaml, Strictness::Strict)),
            vec!["Missing 'apiVersion' field. Expected one of: v1"]
        );
    }

    #[test]
    fn test_every_missing_required_field_reported() {
        let check = check(
            "apiVersion: rbac.authorization.k8s.io/v1\nkind: RoleBinding\nmetadata: {name: rb}\n",
            Strictness::Tolerant,
        );
        assert_eq!(
            messages(&check),
            vec![
                "Missing required field 'roleRef' for RoleBinding",
                "Missing required field 'subjects' for RoleBinding"
            ]
        );
    }

    #[test]
    fn test_strict_stops_at_first_error() {
        let check = check(
            "apiVersion: rbac.authorization.k8s.io/v1\nkind: RoleBinding\nmetadata: {name: rb}\n",
            Strictness::Strict,
        );
        assert_eq!(check.findings.len(), 1);
    }

    #[test]
    fn test_spec_must_be_mapping() {
        let check = check(
            "apiVersion: v1\nkind: Pod\nmetadata: {name: p}\nspec: [a]\n",
            Strictness::Tolerant,
        );
        assert_eq!(messages(&check), vec!["spec must be a mapping, found list"]);
    }

    #[test]
    fn test_deprecated_field_warning() {
        let yaml = format!("{POD}  serviceAccount: legacy\n");
        let check = check(&yaml, Strictness::Tolerant);
        assert_eq!(messages(&check), vec!["Using deprecated field: spec.serviceAccount"]);
        assert!(check.is_valid());
    }

    #[test]
    fn test_validate_content_tolerant_partial() {
        let content = format!("{POD}---\nkind: [unclosed\n");
        let result =
            validate_content(&content, &SchemaCatalog::builtin(), Strictness::Tolerant).unwrap();
        assert!(!result.valid);
        assert_eq!(result.resources.len(), 1);
        assert!(result.errors[0].starts_with("YAML parsing error:"));
    }

    #[test]
    fn test_validate_content_strict_errors() {
        let catalog = SchemaCatalog::builtin();
        assert_eq!(
            validate_content("  \n", &catalog, Strictness::Strict),
            Err(ValidationError::EmptyContent)
        );
        assert_eq!(
            validate_content("---\n# nothing\n", &catalog, Strictness::Strict),
            Err(ValidationError::NoDocuments)
        );
        assert!(matches!(
            validate_content("kind: [unclosed", &catalog, Strictness::Strict),
            Err(ValidationError::YamlSyntax(_))
        ));
        assert_eq!(
            validate_content("apiVersion: v1\n", &catalog, Strictness::Strict),
            Err(ValidationError::MissingKind)
        );
        assert!(validate_content(POD, &catalog, Strictness::Strict).unwrap().valid);
    }
}
