//! Kubernetes manifest validation.
//!
//! Checks YAML manifests (typically embedded in markdown guides) against a
//! curated schema catalog: required fields, API versions, metadata naming
//! and label syntax, per-kind structural rules and deprecated fields.
//!
//! Two error contracts are exposed over the same rules:
//!
//! - **Tolerant** (`KubernetesValidator::new`): every finding is collected
//!   into a `ManifestResult`; nothing returns `Err`.
//! - **Strict** (`KubernetesValidator::strict` and the functions in
//!   [`strict`]): the first violation is returned as a `ValidationError`.
//!
//! # Example
//!
//! ```rust,no_run
//! use kubedoc::analyzer::manifest::KubernetesValidator;
//!
//! let mut validator = KubernetesValidator::new();
//! let result = validator.validate_manifest("apiVersion: v1\nkind: Namespace\nmetadata:\n  name: demo\n");
//! assert!(result.valid);
//! println!("{:?}", validator.summary());
//! ```

pub mod error;
pub mod fields;
pub mod formatter;
pub mod kinds;
pub mod lint;
pub mod parser;
pub mod rules;
pub mod schema;
pub mod session;
pub mod strict;
pub mod types;

pub use error::ValidationError;
pub use formatter::OutputFormat;
pub use kinds::{Classification, ResourceKind, classify};
pub use lint::{ResourceCheck, check_document, validate_content};
pub use schema::{SchemaCatalog, SchemaRule};
pub use session::{KubernetesValidator, ValidationReport, ValidatorOptions};
pub use types::{
    Finding, ManifestResult, RuleCode, RunSummary, Severity, Strictness, ValidationResult,
};
