//! Ansible playbook shape checks.

use crate::analyzer::manifest::parser::value::type_name;
use serde_yaml::Value;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaybookError {
    #[error("Playbook must be a list or mapping, found {found}")]
    InvalidShape { found: &'static str },
    #[error("Play {index} must be a mapping")]
    PlayNotAMapping { index: usize },
    #[error("Play {index} must have 'hosts' field")]
    MissingHosts { index: usize },
}

/// Whether a loaded document should be treated as a playbook rather than
/// a Kubernetes resource.
pub fn is_playbook(document: &Value) -> bool {
    document.is_sequence()
}

/// A playbook is a list of plays, each a mapping with `hosts`. A single
/// mapping (a task file or vars file) is accepted as-is.
pub fn validate_playbook(document: &Value) -> Result<(), PlaybookError> {
    match document {
        Value::Mapping(_) => Ok(()),
        Value::Sequence(plays) => {
            for (i, play) in plays.iter().enumerate() {
                let index = i + 1;
                let play = play
                    .as_mapping()
                    .ok_or(PlaybookError::PlayNotAMapping { index })?;
                if !play.contains_key("hosts") {
                    return Err(PlaybookError::MissingHosts { index });
                }
            }
            Ok(())
        }
        other => Err(PlaybookError::InvalidShape {
            found: type_name(other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    #[test]
    fn test_valid_playbook() {
        let doc = yaml("- hosts: web\n  tasks:\n    - name: ping\n      ping:\n");
        assert!(is_playbook(&doc));
        assert!(validate_playbook(&doc).is_ok());
        assert!(validate_playbook(&yaml("name: vars")).is_ok());
    }

    #[test]
    fn test_invalid_playbooks() {
        assert_eq!(
            validate_playbook(&yaml("- hosts: all\n- tasks: []\n")),
            Err(PlaybookError::MissingHosts { index: 2 })
        );
        assert_eq!(
            validate_playbook(&yaml("- just a string\n")),
            Err(PlaybookError::PlayNotAMapping { index: 1 })
        );
        assert_eq!(
            validate_playbook(&yaml("42")).unwrap_err().to_string(),
            "Playbook must be a list or mapping, found number"
        );
    }
}
