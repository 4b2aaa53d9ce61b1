//! Fenced code block extraction from markdown documents.

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language tag after the opening fence, lowercased. Empty when untagged.
    pub lang: String,
    pub code: String,
    /// 1-based line of the opening fence.
    pub line: usize,
}

impl CodeBlock {
    pub fn is_untagged(&self) -> bool {
        self.lang.is_empty()
    }

    pub fn is_yaml(&self) -> bool {
        matches!(self.lang.as_str(), "yaml" | "yml")
    }

    pub fn is_dockerfile(&self) -> bool {
        matches!(self.lang.as_str(), "dockerfile" | "docker")
    }
}

/// Split markdown into its fenced code blocks, in document order.
/// An unclosed fence at the end of the document is dropped.
pub fn code_blocks(content: &str) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(String, usize)> = None;
    let mut code_lines: Vec<&str> = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        let Some(info) = trimmed.strip_prefix("```") else {
            if open.is_some() {
                code_lines.push(line);
            }
            continue;
        };

        match open.take() {
            Some((lang, start)) => {
                blocks.push(CodeBlock {
                    lang,
                    code: code_lines.join("\n"),
                    line: start,
                });
                code_lines.clear();
            }
            None => {
                // Info strings may carry attributes: ```yaml title="x"
                let lang = info
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .to_lowercase();
                open = Some((lang, index + 1));
            }
        }
    }

    if let Some((lang, line)) = open {
        log::debug!("dropping unclosed ```{} block opened at line {}", lang, line);
    }

    blocks
}

/// Code of every block tagged with `lang` (case-insensitive).
pub fn extract_code_blocks(content: &str, lang: &str) -> Vec<String> {
    let lang = lang.to_lowercase();
    code_blocks(content)
        .into_iter()
        .filter(|block| block.lang == lang)
        .map(|block| block.code)
        .collect()
}

/// Blocks tagged `yaml`/`yml`, plus untagged blocks that look like YAML.
pub fn extract_yaml_blocks(content: &str) -> Vec<String> {
    code_blocks(content)
        .into_iter()
        .filter(|block| block.is_yaml() || (block.is_untagged() && is_likely_yaml(&block.code)))
        .map(|block| block.code)
        .collect()
}

const YAML_INDICATORS: &[&str] = &[
    "apiversion:",
    "kind:",
    "metadata:",
    "spec:",
    "name:",
    "namespace:",
    "labels:",
    "annotations:",
    "containers:",
    "image:",
    "ports:",
    "env:",
];

/// Heuristic for untagged blocks: a Kubernetes key appears, or more than
/// 30% of the non-comment lines contain a `:`.
pub fn is_likely_yaml(content: &str) -> bool {
    if content.trim().is_empty() {
        return false;
    }

    let lower = content.to_lowercase();
    if YAML_INDICATORS.iter().any(|i| lower.contains(i)) {
        return true;
    }

    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .collect();
    if lines.is_empty() {
        return false;
    }

    let keyed = lines.iter().filter(|l| l.contains(':')).count();
    keyed as f64 / lines.len() as f64 > 0.3
}
