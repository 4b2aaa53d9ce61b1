//! Structural rules, dispatched by resource kind.
//!
//! Each kind with dedicated spec checks has one `StructuralRule`
//! implementation registered in a lookup table. Kinds without one fall
//! back to `GenericRule`, which checks nothing beyond metadata.

pub mod cronjob;
pub mod deployment;
pub mod deprecated;
pub mod metadata;
pub mod pod;
pub mod service;
pub mod storage;

use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::types::{Finding, RuleCode, Strictness};
use serde_yaml::Mapping;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Accumulates findings for one resource.
///
/// In strict mode the context halts after the first error: later findings
/// are dropped so the first violation is the one reported.
#[derive(Debug)]
pub struct RuleContext {
    strictness: Strictness,
    findings: Vec<Finding>,
    halted: bool,
}

impl RuleContext {
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            findings: Vec::new(),
            halted: false,
        }
    }

    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Record a schema violation.
    pub fn error(&mut self, rule: RuleCode, message: impl Into<String>) {
        if self.halted {
            return;
        }
        self.findings.push(Finding::error(rule, message));
        if self.strictness.is_strict() {
            self.halted = true;
        }
    }

    /// Record a style or convention issue.
    pub fn warning(&mut self, rule: RuleCode, message: impl Into<String>) {
        if self.halted {
            return;
        }
        self.findings.push(Finding::warning(rule, message));
    }

    /// An error under strict checking, a warning otherwise.
    pub fn advisory(&mut self, rule: RuleCode, message: impl Into<String>) {
        if self.strictness.is_strict() {
            self.error(rule, message);
        } else {
            self.warning(rule, message);
        }
    }

    /// True once strict checking has stopped at an error.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn first_error(&self) -> Option<&Finding> {
        self.findings.iter().find(|f| f.is_error())
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }
}

/// Kind-specific checks over a resource's `spec` mapping.
pub trait StructuralRule: Send + Sync {
    /// Kinds this rule is registered for.
    fn kinds(&self) -> &'static [ResourceKind];

    fn check(&self, kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext);
}

/// Fallback for kinds with no dedicated spec checks.
pub struct GenericRule;

impl StructuralRule for GenericRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[]
    }

    fn check(&self, kind: ResourceKind, _spec: &Mapping, _ctx: &mut RuleContext) {
        log::trace!("no structural rule for {}, metadata checks only", kind);
    }
}

static GENERIC: GenericRule = GenericRule;

static RULES: &[&dyn StructuralRule] = &[
    &deployment::DeploymentRule,
    &service::ServiceRule,
    &pod::PodRule,
    &cronjob::CronJobRule,
    &storage::StorageRule,
];

static REGISTRY: LazyLock<HashMap<ResourceKind, &'static dyn StructuralRule>> =
    LazyLock::new(|| {
        let mut registry = HashMap::new();
        for rule in RULES {
            for kind in rule.kinds() {
                registry.insert(*kind, *rule);
            }
        }
        registry
    });

/// The structural rule registered for a kind, or the generic fallback.
pub fn rule_for(kind: ResourceKind) -> &'static dyn StructuralRule {
    REGISTRY.get(&kind).copied().unwrap_or(&GENERIC)
}
