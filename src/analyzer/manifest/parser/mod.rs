//! YAML loading for manifests.

pub mod value;
pub mod yaml;

pub use yaml::{LoadError, LoadOutcome, load_documents, load_documents_partial, load_first_document};
