//! Service spec checks.

use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::parser::value::{display, type_name};
use crate::analyzer::manifest::rules::{RuleContext, StructuralRule};
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::Mapping;

pub const SERVICE_TYPES: &[&str] = &["ClusterIP", "NodePort", "LoadBalancer", "ExternalName"];

pub struct ServiceRule;

impl StructuralRule for ServiceRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[ResourceKind::Service]
    }

    fn check(&self, _kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext) {
        match spec.get("ports") {
            None => ctx.error(RuleCode::ServicePorts, "Missing ports in Service spec"),
            Some(ports) => match ports.as_sequence() {
                Some(ports) => {
                    for port in ports {
                        check_port(port, ctx);
                    }
                }
                None => ctx.error(
                    RuleCode::ServicePorts,
                    format!("ports must be a list, found {}", type_name(ports)),
                ),
            },
        }

        // An absent type means ClusterIP.
        if let Some(service_type) = spec.get("type") {
            let valid = service_type
                .as_str()
                .is_some_and(|t| SERVICE_TYPES.contains(&t));
            if !valid {
                ctx.error(
                    RuleCode::ServiceType,
                    format!("Invalid Service type: {}", display(service_type)),
                );
            }
        }
    }
}

fn check_port(port: &serde_yaml::Value, ctx: &mut RuleContext) {
    let Some(port) = port.as_mapping() else {
        ctx.error(
            RuleCode::ServicePorts,
            format!("Service port must be a mapping, found {}", type_name(port)),
        );
        return;
    };

    if !port.contains_key("port") {
        ctx.error(
            RuleCode::ServicePorts,
            "Missing port number in Service port definition",
        );
    }
    if !port.contains_key("targetPort") {
        ctx.warning(
            RuleCode::ServicePorts,
            "Missing targetPort in Service port definition",
        );
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
        ServiceRule.check(ResourceKind::Service, spec.as_mapping().unwrap(), &mut ctx);
        ctx.into_findings()
    }

    #[test]
    fn test_missing_ports() {
        let findings = run("selector: {app: web}");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
        assert!(findings[0].message.contains("ports"));
    }

    #[test]
    fn test_missing_target_port_is_warning() {
        let findings = run("ports:\n  - port: 80\n");
        assert_eq!(findings.len(), 1);
        assert!(!findings[0].is_error());
        assert_eq!(findings[0].message, "Missing targetPort in Service port definition");
    }

    #[test]
    fn test_missing_port_number() {
        let findings = run("ports:\n  - targetPort: 8080\n");
        assert_eq!(findings.len(), 1);
        assert!(findings[0].is_error());
    }

    #[test]
    fn test_service_types() {
        for t in SERVICE_TYPES {
            assert!(run(&format!("type: {t}\nports:\n  - port: 80\n    targetPort: 80\n")).is_empty());
        }
        let findings = run("type: Internal\nports:\n  - port: 80\n    targetPort: 80\n");
        assert_eq!(findings[0].message, "Invalid Service type: Internal");
    }
}
