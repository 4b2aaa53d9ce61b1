//! PersistentVolume and PersistentVolumeClaim spec checks.

use crate::analyzer::manifest::kinds::ResourceKind;
use crate::analyzer::manifest::parser::value::{display, type_name};
use crate::analyzer::manifest::rules::{RuleContext, StructuralRule};
use crate::analyzer::manifest::types::RuleCode;
use serde_yaml::Mapping;

pub const ACCESS_MODES: &[&str] = &["ReadWriteOnce", "ReadOnlyMany", "ReadWriteMany"];

pub struct StorageRule;

impl StructuralRule for StorageRule {
    fn kinds(&self) -> &'static [ResourceKind] {
        &[
            ResourceKind::PersistentVolume,
            ResourceKind::PersistentVolumeClaim,
        ]
    }

    fn check(&self, kind: ResourceKind, spec: &Mapping, ctx: &mut RuleContext) {
        if kind == ResourceKind::PersistentVolume && !spec.contains_key("capacity") {
            ctx.error(
                RuleCode::Capacity,
                "Missing capacity in PersistentVolume spec",
            );
        }

        let Some(modes) = spec.get("accessModes") else {
            ctx.error(
                RuleCode::AccessModes,
                format!("Missing accessModes in {} spec", kind),
            );
            return;
        };

        let Some(modes) = modes.as_sequence() else {
            ctx.error(
                RuleCode::AccessModes,
                format!("accessModes must be a list, found {}", type_name(modes)),
            );
            return;
        };

        for mode in modes {
            if !mode.as_str().is_some_and(|m| ACCESS_MODES.contains(&m)) {
                ctx.error(
                    RuleCode::AccessModes,
                    format!("Invalid access mode: {}", display(mode)),
                );
            }
        }
    }
}
