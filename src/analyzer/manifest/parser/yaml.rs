//! YAML document loading for Kubernetes manifests.
//!
//! Streams are split on `---` by the YAML parser itself. Documents that are
//! empty or `null` are dropped so that leading separators, trailing
//! separators and comment-only documents never produce resources.
//!
//! `serde_yaml` caps nesting at 128 levels. A deeper document fails to load
//! with a `recursion limit exceeded` syntax error instead of overflowing the
//! stack, so manifests nested that deeply are reported as YAML errors.

use serde::Deserialize;
use serde_yaml::Value;

/// Error type for loading a YAML stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The parser rejected the stream; carries its diagnostic.
    #[error("{0}")]
    Syntax(String),
    /// The input contained no non-empty document.
    #[error("No YAML documents found")]
    Empty,
}

/// Documents loaded before the stream failed, plus the failure if any.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub documents: Vec<Value>,
    pub error: Option<LoadError>,
}

/// Load every document in the stream, failing the whole call on the first
/// malformed document.
pub fn load_documents(content: &str) -> Result<Vec<Value>, LoadError> {
    let outcome = load_documents_partial(content);
    match outcome.error {
        Some(err) => Err(err),
        None => Ok(outcome.documents),
    }
}

/// Load documents in order, keeping those parsed before a malformed one.
pub fn load_documents_partial(content: &str) -> LoadOutcome {
    let mut outcome = LoadOutcome::default();

    for (index, document) in serde_yaml::Deserializer::from_str(content).enumerate() {
        match Value::deserialize(document) {
            Ok(Value::Null) => {
                log::trace!("skipping empty YAML document #{}", index + 1);
            }
            Ok(value) => outcome.documents.push(value),
            Err(e) => {
                log::debug!("YAML document #{} failed to parse: {}", index + 1, e);
                outcome.error = Some(LoadError::Syntax(e.to_string()));
                break;
            }
        }
    }

    outcome
}

/// Load the first non-empty document. Used by the strict contract, which
/// treats a stream without content as an error.
pub fn load_first_document(content: &str) -> Result<Value, LoadError> {
    load_documents(content)?
        .into_iter()
        .next()
        .ok_or(LoadError::Empty)
}
