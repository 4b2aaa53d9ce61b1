// Handler modules
pub mod validate;

// Re-export all handler functions
pub use validate::{
    ValidateArgs, handle_cron, handle_image, handle_kinds, handle_validate, validate_path,
};
