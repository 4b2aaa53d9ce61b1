//! Static schema catalog: required fields, valid API versions and
//! deprecated field paths per resource kind.
//!
//! The catalog is built once per process and shared read-only through an
//! `Arc`; nothing mutates it after construction.

use crate::analyzer::manifest::kinds::ResourceKind;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

/// Per-kind schema record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRule {
    pub kind: ResourceKind,
    /// Top-level fields that must be present.
    pub required_fields: &'static [&'static str],
    pub api_versions: &'static [&'static str],
    /// Dotted paths that trigger a deprecation warning when present.
    pub deprecated_fields: &'static [&'static str],
}

impl SchemaRule {
    pub fn accepts_api_version(&self, version: &str) -> bool {
        self.api_versions.contains(&version)
    }

    /// Valid API versions, sorted and comma-joined for messages.
    pub fn expected_api_versions(&self) -> String {
        let mut versions = self.api_versions.to_vec();
        versions.sort_unstable();
        versions.join(", ")
    }
}

const BASE: &[&str] = &["apiVersion", "kind", "metadata"];
const WITH_SPEC: &[&str] = &["apiVersion", "kind", "metadata", "spec"];
const WITH_RULES: &[&str] = &["apiVersion", "kind", "metadata", "rules"];
const BINDING: &[&str] = &["apiVersion", "kind", "metadata", "roleRef", "subjects"];

const CORE_V1: &[&str] = &["v1"];
const APPS_V1: &[&str] = &["apps/v1"];
const RBAC_V1: &[&str] = &["rbac.authorization.k8s.io/v1"];

const fn rule(
    kind: ResourceKind,
    required_fields: &'static [&'static str],
    api_versions: &'static [&'static str],
    deprecated_fields: &'static [&'static str],
) -> SchemaRule {
    SchemaRule {
        kind,
        required_fields,
        api_versions,
        deprecated_fields,
    }
}

static BUILTIN_RULES: &[SchemaRule] = &[
    rule(
        ResourceKind::Deployment,
        WITH_SPEC,
        &["apps/v1", "apps/v1beta1", "apps/v1beta2"],
        &["spec.rollbackTo", "spec.selector.matchExpressions"],
    ),
    rule(ResourceKind::Service, WITH_SPEC, CORE_V1, &["spec.portalIP"]),
    rule(ResourceKind::Pod, WITH_SPEC, CORE_V1, &["spec.serviceAccount"]),
    rule(ResourceKind::ConfigMap, BASE, CORE_V1, &[]),
    rule(ResourceKind::Secret, BASE, CORE_V1, &[]),
    rule(ResourceKind::PersistentVolume, WITH_SPEC, CORE_V1, &[]),
    rule(ResourceKind::PersistentVolumeClaim, WITH_SPEC, CORE_V1, &[]),
    rule(
        ResourceKind::Ingress,
        WITH_SPEC,
        &["networking.k8s.io/v1", "networking.k8s.io/v1beta1"],
        &[],
    ),
    rule(ResourceKind::Job, WITH_SPEC, &["batch/v1"], &[]),
    rule(
        ResourceKind::CronJob,
        WITH_SPEC,
        &["batch/v1", "batch/v1beta1"],
        &[],
    ),
    rule(ResourceKind::StatefulSet, WITH_SPEC, APPS_V1, &[]),
    rule(ResourceKind::DaemonSet, WITH_SPEC, APPS_V1, &[]),
    rule(ResourceKind::ReplicaSet, WITH_SPEC, APPS_V1, &[]),
    rule(ResourceKind::ReplicationController, WITH_SPEC, CORE_V1, &[]),
    rule(ResourceKind::Namespace, BASE, CORE_V1, &[]),
    rule(ResourceKind::ServiceAccount, BASE, CORE_V1, &[]),
    rule(ResourceKind::Role, WITH_RULES, RBAC_V1, &[]),
    rule(ResourceKind::RoleBinding, BINDING, RBAC_V1, &[]),
    rule(ResourceKind::ClusterRole, WITH_RULES, RBAC_V1, &[]),
    rule(ResourceKind::ClusterRoleBinding, BINDING, RBAC_V1, &[]),
];

static BUILTIN: LazyLock<Arc<SchemaCatalog>> =
    LazyLock::new(|| Arc::new(SchemaCatalog::from_rules(BUILTIN_RULES)));

/// Lookup table from kind to its schema record.
#[derive(Debug, Clone)]
pub struct SchemaCatalog {
    rules: HashMap<ResourceKind, SchemaRule>,
}

impl SchemaCatalog {
    /// The process-wide built-in catalog.
    pub fn builtin() -> Arc<SchemaCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_rules(rules: &[SchemaRule]) -> Self {
        Self {
            rules: rules.iter().map(|r| (r.kind, r.clone())).collect(),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&SchemaRule> {
        self.rules.get(&kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
