//! Resource name, DNS subdomain and label syntax.

use regex::Regex;
use std::sync::LazyLock;

/// Lowercase alphanumerics and dashes, alphanumeric at both ends.
static NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

static DNS_SUBDOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$").unwrap()
});

static LABEL_SEGMENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]([a-zA-Z0-9\-_.]*[a-zA-Z0-9])?$").unwrap());

pub const MAX_NAME_LENGTH: usize = 63;
pub const MAX_DNS_SUBDOMAIN_LENGTH: usize = 253;
pub const MAX_LABEL_LENGTH: usize = 63;

/// Check a resource (or namespace) name.
///
/// Dots are rejected entirely, so `name..dots` and `valid.name` are both
/// invalid.
pub fn is_valid_name(name: &str) -> bool {
    name.len() <= MAX_NAME_LENGTH && NAME_REGEX.is_match(name)
}

/// Check a DNS subdomain, as used for label key prefixes.
pub fn is_valid_dns_subdomain(name: &str) -> bool {
    name.len() <= MAX_DNS_SUBDOMAIN_LENGTH && DNS_SUBDOMAIN_REGEX.is_match(name)
}

/// Check a label key/value pair. The key may carry a `prefix/` that must be
/// a DNS subdomain; the value may be empty.
pub fn is_valid_label(key: &str, value: &str) -> bool {
    if key.is_empty() {
        return false;
    }

    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            if !is_valid_dns_subdomain(prefix) {
                return false;
            }
            name
        }
        None => key,
    };

    if !LABEL_SEGMENT_REGEX.is_match(name) {
        return false;
    }
    if !value.is_empty() && !LABEL_SEGMENT_REGEX.is_match(value) {
        return false;
    }

    name.len() <= MAX_LABEL_LENGTH && value.len() <= MAX_LABEL_LENGTH
}
