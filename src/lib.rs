//! # kubedoc
//!
//! Validates the Kubernetes manifests embedded in documentation. Fenced
//! code blocks are pulled out of markdown guides and checked against a
//! curated schema catalog; Dockerfile and Ansible snippets get lighter
//! structural checks.
//!
//! ## Example
//!
//! ```rust,no_run
//! use kubedoc::KubernetesValidator;
//!
//! let guide = "```yaml\napiVersion: v1\nkind: Namespace\nmetadata:\n  name: demo\n```\n";
//! let mut validator = KubernetesValidator::new();
//! for result in validator.validate_markdown(guide, None) {
//!     println!("{}: valid={}", result.location(), result.valid);
//! }
//! ```

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::{KubernetesValidator, ManifestResult, Strictness, ValidationError, ValidationReport};
pub use error::{KubedocError, Result};
pub use handlers::*;

use cli::Commands;
use config::types::Config;

/// The current version of the CLI tool
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a command. Returns whether it passed, which decides the exit code.
pub fn run_command(command: Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Validate {
            path,
            strict,
            format,
            fail_on_warnings,
            include_untagged,
            no_color,
        } => {
            let args = ValidateArgs {
                strict,
                format: format.map(Into::into),
                fail_on_warnings,
                include_untagged,
                no_color,
            };
            handlers::handle_validate(&path, &args, config)
        }
        Commands::Cron { schedule } => Ok(handlers::handle_cron(&schedule)),
        Commands::Image { image } => Ok(handlers::handle_image(&image)),
        Commands::Kinds => {
            handlers::handle_kinds();
            Ok(true)
        }
    }
}
