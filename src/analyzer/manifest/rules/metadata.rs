//! Metadata checks, applied to every resource regardless of kind.

use crate::analyzer::manifest::fields::{is_valid_label, is_valid_name};
use crate::analyzer::manifest::parser::value::{display, is_falsy, scalar_string, type_name};
use crate::analyzer::manifest::rules::RuleContext;
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::{Mapping, Value};

pub fn check_metadata(resource: &Mapping, ctx: &mut RuleContext) {
    let metadata = match resource.get("metadata") {
        Some(value) if !is_falsy(value) => value,
        _ => {
            ctx.error(RuleCode::Metadata, "Missing or empty metadata");
            return;
        }
    };

    let Some(metadata) = metadata.as_mapping() else {
        ctx.error(
            RuleCode::Metadata,
            format!("metadata must be a mapping, found {}", type_name(metadata)),
        );
        return;
    };

    match metadata.get("name") {
        None | Some(Value::Null) => ctx.error(RuleCode::Metadata, "Missing metadata.name"),
        Some(name) => {
            if !scalar_string(name).is_some_and(|n| is_valid_name(&n)) {
                ctx.error(
                    RuleCode::ResourceName,
                    format!("Invalid resource name: {}", display(name)),
                );
            }
        }
    }

    if let Some(namespace) = metadata.get("namespace")
        && !namespace.is_null()
        && !scalar_string(namespace).is_some_and(|n| is_valid_name(&n))
    {
        ctx.error(
            RuleCode::Namespace,
            format!("Invalid namespace name: {}", display(namespace)),
        );
    }

    if let Some(labels) = metadata.get("labels")
        && !labels.is_null()
    {
        match labels.as_mapping() {
            Some(labels) => check_labels(labels, ctx),
            None => ctx.error(RuleCode::Labels, "labels must be a mapping"),
        }
    }
}

fn check_labels(labels: &Mapping, ctx: &mut RuleContext) {
    for (key, value) in labels {
        let key_text = scalar_string(key).unwrap_or_default();
        let valid = match label_value(value) {
            Some(value) => is_valid_label(&key_text, &value),
            None => false,
        };
        if !valid {
            ctx.warning(
                RuleCode::Labels,
                format!("Invalid label: {}={}", display(key), display(value)),
            );
        }
    }
}

/// Scalars are compared by their text; `null` is an empty value.
fn label_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        other => scalar_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::manifest::types::{Finding, Strictness};

    fn run(resource: &str) -> Vec<Finding> {
        let mut ctx = RuleContext::new(Strictness::Tolerant);
        let resource: Value = serde_yaml::from_str(resource).unwrap();
        check_metadata(resource.as_mapping().unwrap(), &mut ctx);
        ctx.into_findings()
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_missing_or_empty() {
        for doc in ["kind: Pod", "metadata: {}", "metadata: ~"] {
            assert_eq!(messages(&run(doc)), vec!["Missing or empty metadata"], "{doc}");
        }
    }

    #[test]
    fn test_not_a_mapping() {
        assert_eq!(
            messages(&run("metadata: [a]")),
            vec!["metadata must be a mapping, found list"]
        );
    }

    #[test]
    fn test_name_checks() {
        assert_eq!(
            messages(&run("metadata: {namespace: default}")),
            vec!["Missing metadata.name"]
        );
        assert_eq!(
            messages(&run("metadata: {name: Bad_Name}")),
            vec!["Invalid resource name: Bad_Name"]
        );
        assert!(run("metadata: {name: '123'}").is_empty());
    }

    #[test]
    fn test_namespace() {
        assert_eq!(
            messages(&run("metadata: {name: web, namespace: Prod}")),
            vec!["Invalid namespace name: Prod"]
        );
        assert!(run("metadata: {name: web, namespace: ~}").is_empty());
    }

    #[test]
    fn test_labels() {
        let findings = run("metadata:\n  name: web\n  labels:\n    app: web\n    bad: has space\n    version: 2\n    empty: ~\n");
        assert_eq!(messages(&findings), vec!["Invalid label: bad=has space"]);
        assert!(!findings[0].is_error());

        let findings = run("metadata:\n  name: web\n  labels: [a, b]\n");
        assert_eq!(messages(&findings), vec!["labels must be a mapping"]);
        assert!(findings[0].is_error());

        let findings = run("metadata:\n  name: web\n  labels:\n    app: [nested]\n");
        assert_eq!(messages(&findings), vec!["Invalid label: app=<list>"]);
    }
}
