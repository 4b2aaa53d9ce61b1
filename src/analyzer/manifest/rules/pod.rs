//! Pod spec checks, shared by every kind that embeds a pod template.

use crate::analyzer::manifest::fields::is_valid_image;
use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::parser::value::{is_falsy, resolve_path, scalar_string, type_name};
use crate::analyzer::manifest::rules::{RuleContext, StructuralRule};
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::{Mapping, Value};

pub struct PodRule;

impl StructuralRule for PodRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Pod]
    }

    fn check(&self, _kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext) {
        check_pod_spec(spec, ctx);
    }
}

/// Check a pod spec. A missing `containers` list is reported once and no
/// container checks run.
pub fn check_pod_spec(spec: &Mapping, ctx: &mut RuleContext) {
    let Some(containers) = spec.get("containers") else {
        ctx.error(RuleCode::Containers, "Missing containers in Pod spec");
        return;
    };

    let Some(containers) = containers.as_sequence() else {
        ctx.error(
            RuleCode::Containers,
            format!("containers must be a list, found {}", type_name(containers)),
        );
        return;
    };

    for container in containers {
        match container.as_mapping() {
            Some(container) => check_container(container, ctx),
            None => ctx.error(
                RuleCode::Containers,
                format!("Container must be a mapping, found {}", type_name(container)),
            ),
        }
    }
}

fn check_container(container: &Mapping, ctx: &mut RuleContext) {
    if !container.contains_key("name") {
        ctx.error(RuleCode::Containers, "Missing container name");
    }

    match container.get("image") {
        None => ctx.error(RuleCode::ContainerImage, "Missing container image"),
        Some(image) if is_falsy(image) => {
            ctx.error(RuleCode::ContainerImage, "Empty container image")
        }
        Some(image) => match scalar_string(image) {
            Some(image) => check_image_format(&image, ctx),
            None => ctx.error(
                RuleCode::ContainerImage,
                format!("Container image must be a string, found {}", type_name(image)),
            ),
        },
    }

    if let Some(resources) = container.get("resources") {
        let has_limits = resources
            .as_mapping()
            .is_some_and(|r| r.contains_key("limits") || r.contains_key("requests"));
        if !has_limits {
            ctx.warning(
                RuleCode::ContainerResources,
                "Container has resources section but no limits or requests",
            );
        }
    }
}

fn check_image_format(image: &str, ctx: &mut RuleContext) {
    if !is_valid_image(image) {
        ctx.advisory(
            RuleCode::ContainerImage,
            format!("Invalid image format: {}", image),
        );
    }
}

/// Image-reference check only, over the containers of a pod spec found at
/// `template.spec`. Shapes that do not resolve are skipped.
pub fn check_template_images(template: &Value, ctx: &mut RuleContext) {
    let Some(containers) = resolve_path(template, "spec.containers").and_then(Value::as_sequence)
    else {
        return;
    };

    let images = containers
        .iter()
        .filter_map(|c| c.as_mapping()?.get("image"))
        .filter(|image| !is_falsy(image))
        .filter_map(scalar_string);
    for image in images {
        check_image_format(&image, ctx);
    }
}

/// Check the pod spec nested under a template mapping (`template.spec`).
/// A template without `spec` has nothing to check.
pub fn check_pod_template(template: &Value, ctx: &mut RuleContext) {
    let Some(template) = template.as_mapping() else {
        ctx.error(
            RuleCode::PodTemplate,
            format!("template must be a mapping, found {}", type_name(template)),
        );
        return;
    };

    match template.get("spec") {
        None => {}
        Some(spec) => match spec.as_mapping() {
            Some(spec) => check_pod_spec(spec, ctx),
            None => ctx.error(
                RuleCode::PodTemplate,
                format!("template.spec must be a mapping, found {}", type_name(spec)),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::manifest::types::{Finding, Strictness};

    fn run(spec: &str, strictness: Strictness) -> Vec<Finding> {
        let mut ctx = RuleContext::new(strictness);
        let spec: Value = serde_yaml::from_str(spec).unwrap();
        check_pod_spec(spec.as_mapping().unwrap(), &mut ctx);
        ctx.into_findings()
    }

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn test_missing_containers_stops() {
        let findings = run("restartPolicy: Always", Strictness::Tolerant);
        assert_eq!(messages(&findings), vec!["Missing containers in Pod spec"]);
    }

    #[test]
    fn test_container_errors_accumulate() {
        let findings = run(
            "containers:\n  - image: nginx\n  - name: b\n  - name: c\n    image: ''\n",
            Strictness::Tolerant,
        );
        assert_eq!(
            messages(&findings),
            vec![
                "Missing container name",
                "Missing container image",
                "Empty container image"
            ]
        );
    }

    #[test]
    fn test_resources_without_limits_warns() {
        let findings = run(
            "containers:\n  - name: a\n    image: nginx\n    resources: {}\n",
            Strictness::Tolerant,
        );
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_error());

        let findings = run(
            "containers:\n  - name: a\n    image: nginx\n    resources:\n      limits: {cpu: 100m}\n",
            Strictness::Tolerant,
        );
        assert!(findings.is_empty());
    }

    #[test]
    fn test_bad_image_format_depends_on_strictness() {
        let spec = "containers:\n  - name: a\n    image: 'nginx:tag with space'\n";
        let tolerant = run(spec, Strictness::Tolerant);
        assert_eq!(tolerant.len(), 1);
        assert!(!tolerant[0].is_error());

        let strict = run(spec, Strictness::Strict);
        assert!(strict[0].is_error());
        assert_eq!(strict[0].message, "Invalid image format: nginx:tag with space");
    }

    #[test]
    fn test_template_images_only() {
        let template: Value = serde_yaml::from_str(
            "spec:\n  containers:\n    - image: busybox\n    - image: 'bad image'\n    - {}\n",
        )
        .unwrap();

        let mut ctx = RuleContext::new(Strictness::Tolerant);
        check_template_images(&template, &mut ctx);
        assert_eq!(messages(ctx.findings()), vec!["Invalid image format: bad image"]);
        assert!(!ctx.findings()[0].is_error());

        let mut ctx = RuleContext::new(Strictness::Tolerant);
        check_template_images(&Value::Null, &mut ctx);
        assert!(ctx.findings().is_empty());
    }

    #[test]
    fn test_template_without_spec() {
        let mut ctx = RuleContext::new(Strictness::Tolerant);
        let template: Value = serde_yaml::from_str("metadata: {labels: {app: x}}").unwrap();
        check_pod_template(&template, &mut ctx);
        assert!(ctx.findings().is_empty(), "{:?}", ctx.findings());
    }
}
