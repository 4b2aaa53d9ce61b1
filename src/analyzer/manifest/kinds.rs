//! Resource kinds and document classification.

use crate::analyzer::manifest::parser::value::{display, is_falsy, scalar_string, type_name};
use serde_yaml::{Mapping, Value};
use std::borrow::Cow;
use std::fmt;

/// Kubernetes kinds with an entry in the schema catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Deployment,
    Service,
    Pod,
    ConfigMap,
    Secret,
    PersistentVolume,
    PersistentVolumeClaim,
    Ingress,
    Job,
    CronJob,
    StatefulSet,
    DaemonSet,
    ReplicaSet,
    ReplicationController,
    Namespace,
    ServiceAccount,
    Role,
    RoleBinding,
    ClusterRole,
    ClusterRoleBinding,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 20] = [
        Self::Deployment,
        Self::Service,
        Self::Pod,
        Self::ConfigMap,
        Self::Secret,
        Self::PersistentVolume,
        Self::PersistentVolumeClaim,
        Self::Ingress,
        Self::Job,
        Self::CronJob,
        Self::StatefulSet,
        Self::DaemonSet,
        Self::ReplicaSet,
        Self::ReplicationController,
        Self::Namespace,
        Self::ServiceAccount,
        Self::Role,
        Self::RoleBinding,
        Self::ClusterRole,
        Self::ClusterRoleBinding,
    ];

    /// Look up a kind by its exact (case-sensitive) name.
    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deployment => "Deployment",
            Self::Service => "Service",
            Self::Pod => "Pod",
            Self::ConfigMap => "ConfigMap",
            Self::Secret => "Secret",
            Self::PersistentVolume => "PersistentVolume",
            Self::PersistentVolumeClaim => "PersistentVolumeClaim",
            Self::Ingress => "Ingress",
            Self::Job => "Job",
            Self::CronJob => "CronJob",
            Self::StatefulSet => "StatefulSet",
            Self::DaemonSet => "DaemonSet",
            Self::ReplicaSet => "ReplicaSet",
            Self::ReplicationController => "ReplicationController",
            Self::Namespace => "Namespace",
            Self::ServiceAccount => "ServiceAccount",
            Self::Role => "Role",
            Self::RoleBinding => "RoleBinding",
            Self::ClusterRole => "ClusterRole",
            Self::ClusterRoleBinding => "ClusterRoleBinding",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a loaded document turned out to be.
#[derive(Debug, Clone)]
pub enum Classification<'a> {
    /// The document is not a mapping at all.
    NotAMapping { found: &'static str },
    /// `kind` is absent or falsy.
    MissingKind,
    /// A kind present in the catalog.
    Known {
        kind: ResourceKind,
        resource: &'a Mapping,
    },
    /// A kind the catalog does not know. Non-string kinds are rendered
    /// as written (`42`, `<list>`).
    Unknown {
        kind: Cow<'a, str>,
        resource: &'a Mapping,
    },
}

/// Classify one loaded document by its `kind`.
pub fn classify(document: &Value) -> Classification<'_> {
    let Some(resource) = document.as_mapping() else {
        return Classification::NotAMapping {
            found: type_name(document),
        };
    };

    let kind = match resource.get("kind") {
        Some(value) if !is_falsy(value) => value,
        _ => return Classification::MissingKind,
    };

    match kind.as_str() {
        Some(name) => match ResourceKind::from_kind(name) {
            Some(kind) => Classification::Known { kind, resource },
            None => Classification::Unknown {
                kind: Cow::Borrowed(name),
                resource,
            },
        },
        // A non-string kind (`kind: 42`) can never name a catalog entry.
        None => Classification::Unknown {
            kind: Cow::Owned(display(kind)),
            resource,
        },
    }
}

/// `metadata.name` as text, or `"Unnamed"`.
pub fn resource_name(resource: &Mapping) -> String {
    resource
        .get("metadata")
        .and_then(Value::as_mapping)
        .and_then(|m| m.get("name"))
        .and_then(scalar_string)
        .unwrap_or_else(|| "Unnamed".to_string())
}
