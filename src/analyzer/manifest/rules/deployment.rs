//! Deployment spec checks.

use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::parser::value::display;
use crate::analyzer::manifest::rules::pod::check_pod_template;
use crate::analyzer::manifest::rules::{RuleContext, StructuralRule};
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::Mapping;

pub struct DeploymentRule;

impl StructuralRule for DeploymentRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Deployment]
    }

    fn check(&self, _kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext) {
        if let Some(replicas) = spec.get("replicas")
            && !replicas.as_i64().is_some_and(|n| n >= 0)
        {
            ctx.error(
                RuleCode::Replicas,
                format!("Invalid replicas value: {}", display(replicas)),
            );
        }

        if !spec.contains_key("selector") {
            ctx.error(RuleCode::Selector, "Missing selector in Deployment spec");
        }

        match spec.get("template") {
            Some(template) => check_pod_template(template, ctx),
            None => ctx.error(RuleCode::PodTemplate, "Missing template in Deployment spec"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::manifest::types::{Finding, Strictness};
    use serde_yaml::Value;

    fn run(spec: &str) -> Vec<Finding> {
        let mut ctx = RuleContext::new(Strictness::Tolerant);
        let spec: Value = serde_yaml::from_str(spec).unwrap();
        DeploymentRule.check(ResourceKind::Deployment, spec.as_mapping().unwrap(), &mut ctx);
        ctx.into_findings()
    }

    const TEMPLATE: &str = "
selector:
  matchLabels: {app: web}
template:
  spec:
    containers:
      - name: web
        image: nginx:1.25
";

    #[test]
    fn test_valid_spec() {
        assert!(run(TEMPLATE).is_empty());
    }

    #[test]
    fn test_replicas() {
        for bad in ["-1", "'3'", "1.5", "~"] {
            let findings = run(&format!("replicas: {bad}\n{TEMPLATE}"));
            assert_eq!(findings.len(), 1, "{bad}");
            assert!(findings[0].message.contains("replicas"));
        }
        assert!(run(&format!("replicas: 0\n{TEMPLATE}")).is_empty());
    }

    #[test]
    fn test_missing_selector_and_template() {
        let findings = run("replicas: 2");
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Missing selector in Deployment spec",
                "Missing template in Deployment spec"
            ]
        );
    }

    #[test]
    fn test_template_without_spec_is_accepted() {
        let findings = run("selector:\n  matchLabels: {app: web}\ntemplate:\n  metadata:\n    labels: {app: web}\n");
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_template_pod_spec_checked() {
        let findings = run("selector: {}\ntemplate:\n  spec:\n    containers:\n      - name: web\n");
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "Missing container image");
    }
}
