//! Minimal Dockerfile checks for snippets embedded in documentation.

use crate::analyzer::manifest::fields::is_valid_image;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DockerfileError {
    #[error("Dockerfile cannot be empty")]
    Empty,
    #[error("Dockerfile must start with FROM instruction, found {instruction} on line {line}")]
    MissingFrom { instruction: String, line: usize },
    #[error("FROM instruction on line {line} has no image")]
    MissingImage { line: usize },
    #[error("Invalid base image on line {line}: {image}")]
    InvalidBaseImage { image: String, line: usize },
}

/// Check that the first instruction is `FROM` (only `ARG` may precede it)
/// and that every `FROM` names a plausible image.
pub fn validate_dockerfile(content: &str) -> Result<(), DockerfileError> {
    let mut seen_from = false;
    let mut seen_instruction = false;

    for (index, line) in content.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut words = trimmed.split_whitespace();
        let instruction = words.next().unwrap_or_default().to_uppercase();

        if instruction == "FROM" {
            seen_from = true;
            seen_instruction = true;
            check_from(words, line_no)?;
            continue;
        }

        // Continuation lines of an earlier instruction are not instructions.
        if seen_instruction && !is_instruction(&instruction) {
            continue;
        }
        seen_instruction = true;

        if !seen_from && instruction != "ARG" {
            return Err(DockerfileError::MissingFrom {
                instruction,
                line: line_no,
            });
        }
    }

    if seen_from {
        Ok(())
    } else {
        Err(DockerfileError::Empty)
    }
}

fn check_from<'a>(mut args: impl Iterator<Item = &'a str>, line: usize) -> Result<(), DockerfileError> {
    let image = loop {
        match args.next() {
            Some(flag) if flag.starts_with("--") => continue,
            Some(image) => break image,
            None => return Err(DockerfileError::MissingImage { line }),
        }
    };

    // Build args and `scratch` are resolved by the builder.
    if image == "scratch" || image.contains('$') {
        return Ok(());
    }

    // Digests are outside the image grammar; check the name part.
    let name = image.split('@').next().unwrap_or(image);
    if !is_valid_image(name) {
        return Err(DockerfileError::InvalidBaseImage {
            image: image.to_string(),
            line,
        });
    }
    Ok(())
}

const INSTRUCTIONS: &[&str] = &[
    "ADD",
    "ARG",
    "CMD",
    "COPY",
    "ENTRYPOINT",
    "ENV",
    "EXPOSE",
    "FROM",
    "HEALTHCHECK",
    "LABEL",
    "MAINTAINER",
    "ONBUILD",
    "RUN",
    "SHELL",
    "STOPSIGNAL",
    "USER",
    "VOLUME",
    "WORKDIR",
];

fn is_instruction(word: &str) -> bool {
    INSTRUCTIONS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dockerfiles() {
        assert!(validate_dockerfile("FROM nginx:1.25\nCOPY . /usr/share/nginx/html\n").is_ok());
        assert!(validate_dockerfile("# syntax=docker/dockerfile:1\n\nfrom alpine\nRUN apk add curl\n").is_ok());
        assert!(validate_dockerfile("ARG VERSION=3.12\nFROM python:${VERSION}\n").is_ok());
        assert!(validate_dockerfile("FROM --platform=linux/amd64 golang:1.22 AS build\n").is_ok());
        assert!(validate_dockerfile("FROM scratch\n").is_ok());
        assert!(validate_dockerfile(
            "FROM ubuntu@sha256:45b23dee08af5e43a7fea6c4cf9c25ccf269ee113168c19722f87876677c5cb2\n"
        )
        .is_ok());
    }

    #[test]
    fn test_empty() {
        assert_eq!(validate_dockerfile(""), Err(DockerfileError::Empty));
        assert_eq!(validate_dockerfile("# just a comment\n"), Err(DockerfileError::Empty));
    }

    #[test]
    fn test_must_start_with_from() {
        assert_eq!(
            validate_dockerfile("RUN echo hi\nFROM alpine\n"),
            Err(DockerfileError::MissingFrom {
                instruction: "RUN".to_string(),
                line: 1
            })
        );
    }

    #[test]
    fn test_from_arguments() {
        assert_eq!(
            validate_dockerfile("FROM\n"),
            Err(DockerfileError::MissingImage { line: 1 })
        );
        assert!(matches!(
            validate_dockerfile("FROM bad//image\n"),
            Err(DockerfileError::InvalidBaseImage { line: 1, .. })
        ));
    }

    #[test]
    fn test_continuation_lines_skipped() {
        let content = "FROM debian\nRUN apt-get update && \\\n    apt-get install -y curl\n";
        assert!(validate_dockerfile(content).is_ok());
    }
}
