//! Document-level checks for markdown task guides.
//!
//! A guide is expected to open with a `# Title`, carry Problem and Solution
//! sections and at least one shell block, tag its code blocks with a
//! language, and keep its prose tidy (no runs of blank lines, no long lines,
//! no trailing whitespace, no dangling links). Headings and links are only
//! read from prose, never from inside fenced code.
//!
//! The task metadata (title, category, which kinds of content the guide
//! has) is extracted in the same pass and attached to the result.

use crate::analyzer::manifest::types::{ManifestResult, ValidationResult};
use crate::analyzer::markdown::code_blocks;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Resource kind reported for document-level results.
pub const DOCUMENT_KIND: &str = "Document";

const MAX_LINE_LENGTH: usize = 120;
const MAX_BLANK_LINES: usize = 2;

const SHELL_LANGS: &[&str] = &["bash", "shell", "sh"];

/// Checked in order; the first keyword found names the category.
const CATEGORIES: &[&str] = &["Kubernetes", "Docker", "Ansible", "Git", "Puppet"];

static TITLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#\s+(\S.*)$").unwrap());

static HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6}\s+(.+)$").unwrap());

static PROBLEM_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#{2,6}\s+(?:Problem|Task|Description)\b").unwrap());

static SOLUTION_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#{2,6}\s+Solution\b").unwrap());

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]*)\)").unwrap());

/// What a task guide is about and what it contains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskMetadata {
    /// Text of the first `# ` heading.
    pub title: Option<String>,
    /// First technology keyword mentioned anywhere in the guide.
    pub category: Option<String>,
    pub has_solution: bool,
    pub has_commands: bool,
    pub has_yaml: bool,
}

/// Findings for one markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentCheck {
    pub metadata: TaskMetadata,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl DocumentCheck {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Wrap the findings as a one-resource result named after the title.
    pub fn into_result(self) -> ManifestResult {
        let name = self
            .metadata
            .title
            .clone()
            .unwrap_or_else(|| "Untitled".to_string());
        let mut resource = ValidationResult::new(DOCUMENT_KIND, name);
        resource.errors = self.errors;
        resource.warnings = self.warnings;
        ManifestResult::from_resources(vec![resource], None).with_metadata(self.metadata)
    }
}

/// Lines outside fenced code blocks, with their 1-based line numbers.
fn prose_lines(content: &str) -> Vec<(usize, &str)> {
    let mut in_fence = false;
    let mut lines = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim_start().starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            lines.push((index + 1, line));
        }
    }
    lines
}

/// Extract the task metadata of a guide.
pub fn extract_task_metadata(content: &str) -> TaskMetadata {
    let prose = prose_lines(content);
    let blocks = code_blocks(content);

    let title = prose
        .iter()
        .find_map(|(_, line)| TITLE.captures(line))
        .map(|caps| caps[1].trim().to_string());

    let lowered = content.to_lowercase();
    let category = CATEGORIES
        .iter()
        .find(|keyword| lowered.contains(&keyword.to_lowercase()))
        .map(|keyword| keyword.to_string());

    TaskMetadata {
        title,
        category,
        has_solution: prose.iter().any(|(_, line)| SOLUTION_SECTION.is_match(line)),
        has_commands: blocks.iter().any(|b| SHELL_LANGS.contains(&b.lang.as_str())),
        has_yaml: blocks.iter().any(|b| b.is_yaml()),
    }
}

/// Run every document-level check over a markdown guide.
pub fn check_markdown(content: &str) -> DocumentCheck {
    let mut check = DocumentCheck {
        metadata: extract_task_metadata(content),
        ..DocumentCheck::default()
    };
    let prose = prose_lines(content);

    check_sections(&prose, &mut check);
    check_code_blocks(content, &mut check);
    check_formatting(content, &mut check);
    check_links(&prose, &mut check);

    log::debug!(
        "document '{}': {} error(s), {} warning(s)",
        check.metadata.title.as_deref().unwrap_or("Untitled"),
        check.errors.len(),
        check.warnings.len()
    );
    check
}

fn check_sections(prose: &[(usize, &str)], check: &mut DocumentCheck) {
    if check.metadata.title.is_none() {
        check.errors.push("Missing main title (# Title)".to_string());
    }

    let has_problem = prose.iter().any(|(_, line)| PROBLEM_SECTION.is_match(line));
    let recommended = [
        ("Problem", has_problem),
        ("Solution", check.metadata.has_solution),
        ("Commands", check.metadata.has_commands),
    ];
    for (section, present) in recommended {
        if !present {
            check
                .warnings
                .push(format!("Missing recommended section: {}", section));
        }
    }
}

fn check_code_blocks(content: &str, check: &mut DocumentCheck) {
    let blocks = code_blocks(content);

    if blocks.is_empty() && check.metadata.has_solution {
        check
            .warnings
            .push("Solution section exists but no code blocks found".to_string());
    }

    let untagged = blocks.iter().filter(|b| b.is_untagged()).count();
    if untagged > 0 {
        check.warnings.push(format!(
            "Found {} code blocks without language specification",
            untagged
        ));
    }
}

fn check_formatting(content: &str, check: &mut DocumentCheck) {
    let mut blank_run = 0;

    for (index, line) in content.lines().enumerate() {
        let number = index + 1;

        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > MAX_BLANK_LINES {
                check
                    .warnings
                    .push(format!("Excessive blank lines at line {}", number));
            }
        } else {
            blank_run = 0;
        }

        if line.chars().count() > MAX_LINE_LENGTH && !line.starts_with("```") {
            check.warnings.push(format!(
                "Line {} exceeds {} characters",
                number, MAX_LINE_LENGTH
            ));
        }

        if line != line.trim_end() {
            check
                .warnings
                .push(format!("Trailing whitespace at line {}", number));
        }
    }
}

/// GitHub-style anchor for a heading: lowercase, spaces to dashes, other
/// punctuation dropped.
fn slugify(heading: &str) -> String {
    heading
        .trim()
        .to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            c if c.is_alphanumeric() || c == '-' || c == '_' => Some(c),
            _ => None,
        })
        .collect()
}

fn check_links(prose: &[(usize, &str)], check: &mut DocumentCheck) {
    let anchors: Vec<String> = prose
        .iter()
        .filter_map(|(_, line)| HEADING.captures(line))
        .map(|caps| slugify(&caps[1]))
        .collect();

    for (_, line) in prose {
        for caps in LINK.captures_iter(line) {
            let text = &caps[1];
            let url = caps[2].trim();

            if url.is_empty() {
                check
                    .errors
                    .push(format!("Empty link URL for text: {}", text));
            } else if let Some(anchor) = url.strip_prefix('#') {
                let anchor = anchor.to_lowercase().replace(' ', "-");
                if !anchors.contains(&anchor) {
                    check
                        .warnings
                        .push(format!("Possible broken anchor link: {}", url));
                }
            } else if !(url.starts_with("http://")
                || url.starts_with("https://")
                || url.starts_with('/'))
            {
                check
                    .warnings
                    .push(format!("Unusual link format: {}", url));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GUIDE: &str = "# Deploy Nginx on Kubernetes

## Problem

Run nginx with two replicas. See [the solution](#solution) and the
[docs](https://kubernetes.io/docs/).

## Solution

```bash
kubectl apply -f deploy.yaml
```

```yaml
apiVersion: v1
kind: Namespace
metadata:
  name: web
```
";

    #[test]
    fn test_clean_guide() {
        let check = check_markdown(GUIDE);
        assert!(check.is_valid());
        assert!(check.warnings.is_empty(), "{:?}", check.warnings);
    }

    #[test]
    fn test_metadata() {
        let metadata = extract_task_metadata(GUIDE);
        assert_eq!(metadata.title.as_deref(), Some("Deploy Nginx on Kubernetes"));
        assert_eq!(metadata.category.as_deref(), Some("Kubernetes"));
        assert!(metadata.has_solution);
        assert!(metadata.has_commands);
        assert!(metadata.has_yaml);

        let empty = extract_task_metadata("plain text");
        assert_eq!(empty, TaskMetadata::default());
    }

    #[test]
    fn test_missing_title_and_sections() {
        let check = check_markdown("Some notes.\n");
        assert_eq!(check.errors, vec!["Missing main title (# Title)"]);
        assert_eq!(
            check.warnings,
            vec![
                "Missing recommended section: Problem",
                "Missing recommended section: Solution",
                "Missing recommended section: Commands",
            ]
        );
    }

    #[test]
    fn test_comment_in_code_block_is_not_a_title() {
        let check = check_markdown("```bash\n# install\napt-get install nginx\n```\n");
        assert!(check.metadata.title.is_none());
        assert!(!check.is_valid());
    }

    #[test]
    fn test_code_block_findings() {
        let check = check_markdown("# T\n\n## Solution\n\nJust do it.\n");
        assert!(check
            .warnings
            .contains(&"Solution section exists but no code blocks found".to_string()));

        let check = check_markdown("# T\n\n```\nls\n```\n\n```\npwd\n```\n");
        assert!(check
            .warnings
            .contains(&"Found 2 code blocks without language specification".to_string()));
    }

    #[test]
    fn test_formatting() {
        let long = "x".repeat(121);
        let content = format!("# T\n\n\n\ntrailing \n{long}\n");
        let check = check_markdown(&content);
        let formatting: Vec<_> = check
            .warnings
            .iter()
            .filter(|w| !w.starts_with("Missing recommended"))
            .map(String::as_str)
            .collect();
        assert_eq!(
            formatting,
            vec![
                "Excessive blank lines at line 4",
                "Trailing whitespace at line 5",
                "Line 6 exceeds 120 characters",
            ]
        );
    }

    #[test]
    fn test_links() {
        let content = "# Title\n\n## Setup Steps\n\n[ok](#setup-steps) [gone](#missing) [empty]() [rel](notes.md) [abs](/docs) [web](https://x.io)\n";
        let check = check_markdown(content);
        assert_eq!(check.errors, vec!["Empty link URL for text: empty"]);
        assert!(check.warnings.contains(&"Possible broken anchor link: #missing".to_string()));
        assert!(check.warnings.contains(&"Unusual link format: notes.md".to_string()));
        assert!(!check.warnings.iter().any(|w| w.contains("#setup-steps")));
        assert!(!check.warnings.iter().any(|w| w.contains("/docs") || w.contains("x.io")));
    }

    #[test]
    fn test_into_result() {
        let result = check_markdown(GUIDE).into_result();
        assert!(result.valid);
        assert_eq!(result.resources[0].kind, DOCUMENT_KIND);
        assert_eq!(result.resources[0].name, "Deploy Nginx on Kubernetes");
        assert_eq!(
            result.metadata.as_ref().and_then(|m| m.category.as_deref()),
            Some("Kubernetes")
        );

        let result = check_markdown("").into_result();
        assert!(!result.valid);
        assert_eq!(result.resources[0].name, "Untitled");
    }
}
