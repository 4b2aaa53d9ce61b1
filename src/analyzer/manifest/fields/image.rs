//! Container image reference syntax.

use regex::Regex;
use std::sync::LazyLock;

/// `[registry[:port]/]path[/path...][:tag]`, matched case-insensitively.
static IMAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^",
        r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*",
        r"(?::[0-9]+)?/)?",
        r"[a-z0-9]+(?:[._-][a-z0-9]+)*",
        r"(?:/[a-z0-9]+(?:[._-][a-z0-9]+)*)*",
        r"(?::[a-zA-Z0-9._-]+)?$",
    ))
    .unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("Image cannot be empty")]
    Empty,
    #[error("Invalid image format: {0}")]
    InvalidFormat(String),
}

pub fn is_valid_image(image: &str) -> bool {
    !image.is_empty() && IMAGE_REGEX.is_match(image)
}

/// Validate an image reference, reporting why it was rejected.
pub fn validate_image_tag(image: &str) -> Result<(), ImageError> {
    if image.is_empty() {
        return Err(ImageError::Empty);
    }
    if !IMAGE_REGEX.is_match(image) {
        return Err(ImageError::InvalidFormat(image.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_images() {
        for image in [
            "nginx",
            "nginx:1.21",
            "nginx:latest",
            "library/nginx",
            "gcr.io/project/image:tag",
            "registry.example.com:5000/team/app:v1.2.3",
            "localhost:5000/app",
            "my-app_v2.service:2024-01-01",
            "Nginx",
        ] {
            assert!(validate_image_tag(image).is_ok(), "{image}");
        }
    }

    #[test]
    fn test_invalid_images() {
        assert_eq!(validate_image_tag(""), Err(ImageError::Empty));
        for image in [
            "nginx:",
            "-nginx",
            "nginx:tag with space",
            "bad//path",
            "app/",
            ":tag",
        ] {
            assert_eq!(
                validate_image_tag(image),
                Err(ImageError::InvalidFormat(image.to_string())),
                "{image}"
            );
        }
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ImageError::Empty.to_string(), "Image cannot be empty");
        assert_eq!(
            ImageError::InvalidFormat("x y".into()).to_string(),
            "Invalid image format: x y"
        );
    }
}
