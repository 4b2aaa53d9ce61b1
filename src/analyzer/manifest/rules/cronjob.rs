//! CronJob spec checks.

use crate::analyzer::manifest::fields::validate_cron_schedule;
use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::parser::value::{display, resolve_path, scalar_string};
use crate::analyzer::manifest::rules::pod::check_template_images;
use crate::analyzer::manifest::rules::{RuleContext, StructuralRule};
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::Mapping;

pub struct CronJobRule;

impl StructuralRule for CronJobRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::CronJob]
    }

    fn check(&self, _kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext) {
        match spec.get("schedule") {
            None => ctx.error(RuleCode::CronSchedule, "Missing schedule in CronJob spec"),
            Some(schedule) => {
                let text = scalar_string(schedule).unwrap_or_default();
                if let Err(e) = validate_cron_schedule(&text) {
                    ctx.error(
                        RuleCode::CronSchedule,
                        format!("Invalid cron schedule: {} ({})", display(schedule), e),
                    );
                }
            }
        }

        match spec.get("jobTemplate") {
            None => ctx.error(RuleCode::JobTemplate, "Missing jobTemplate in CronJob spec"),
            Some(job_template) => {
                if let Some(template) = resolve_path(job_template, "spec.template") {
                    check_template_images(template, ctx);
                }
            }
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
        CronJobRule.check(ResourceKind::CronJob, spec.as_mapping().unwrap(), &mut ctx);
        ctx.into_findings()
    }

    #[test]
    fn test_valid_cronjob() {
        let findings = run(
            "schedule: '*/5 * * * *'\njobTemplate:\n  spec:\n    template:\n      spec:\n        containers:\n          - name: job\n            image: busybox\n",
        );
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_job_pod_spec_is_not_structurally_checked() {
        let findings = run(
            "schedule: '0 3 * * *'\njobTemplate:\n  spec:\n    template:\n      spec:\n        containers:\n          - image: busybox\n",
        );
        assert!(findings.is_empty(), "{findings:?}");

        let findings = run("schedule: '0 3 * * *'\njobTemplate:\n  spec:\n    template: {}\n");
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn test_job_container_image_is_advisory() {
        let spec = "schedule: '0 3 * * *'\njobTemplate:\n  spec:\n    template:\n      spec:\n        containers:\n          - name: job\n            image: 'busy box'\n";
        let findings = run(spec);
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_error());
        assert_eq!(findings[0].message, "Invalid image format: busy box");
    }

    #[test]
    fn test_invalid_schedule_names_it() {
        let findings = run("schedule: '60 * * * *'\njobTemplate: {}\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.starts_with("Invalid cron schedule: 60 * * * *"));
        assert!(findings[0].message.contains("minute"));
    }

    #[test]
    fn test_non_string_schedule() {
        let findings = run("schedule: 5\njobTemplate: {}\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.starts_with("Invalid cron schedule: 5"));
    }

    #[test]
    fn test_missing_fields() {
        let findings = run("concurrencyPolicy: Forbid");
        let messages: Vec<_> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Missing schedule in CronJob spec",
                "Missing jobTemplate in CronJob spec"
            ]
        );
    }
}
