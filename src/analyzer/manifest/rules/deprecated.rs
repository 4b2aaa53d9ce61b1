//! Deprecated field detection.

use crate::analyzer::manifest::parser::value::resolve_path;
use crate::analyzer::manifest::rules::RuleContext;
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::Value;

/// Warn for every deprecated path that resolves in the document. A key
/// holding `null` counts as present.
pub fn check_deprecated_fields(document: &Value, paths: &[&str], ctx: &mut RuleContext) {
    for path in paths {
        if resolve_path(document, path).is_some() {
            ctx.warning(
                RuleCode::DeprecatedField,
                format!("Using deprecated field: {}", path),
            );
        }
    }
}
