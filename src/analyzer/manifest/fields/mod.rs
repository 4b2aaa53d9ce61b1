//! Field-level syntax checks shared by the structural rules.

pub mod cron;
pub mod image;
pub mod names;

pub use cron::{CronError, CronField, validate_cron_schedule};
pub use image::{ImageError, is_valid_image, validate_image_tag};
pub use names::{is_valid_dns_subdomain, is_valid_label, is_valid_name};
