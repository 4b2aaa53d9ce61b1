//! Helpers for reading loosely-typed YAML values.

use serde_yaml::Value;

/// Name of a value's YAML type, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "list",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Textual form of a scalar. Collections and null yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_string(&tagged.value),
        _ => None,
    }
}

/// Render any value for inclusion in a message.
pub fn display(value: &Value) -> String {
    match scalar_string(value) {
        Some(s) => s,
        None => match value {
            Value::Null => "null".to_string(),
            Value::Sequence(_) => "<list>".to_string(),
            _ => "<mapping>".to_string(),
        },
    }
}

/// Whether a value counts as absent: null, false, zero, or empty.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Sequence(seq) => seq.is_empty(),
        Value::Mapping(map) => map.is_empty(),
        Value::Tagged(tagged) => is_falsy(&tagged.value),
    }
}

/// Resolve a dotted path (`spec.selector.matchExpressions`) through nested
/// mappings. A key whose value is `null` still counts as present; any
/// missing or non-mapping intermediate makes the path unresolvable.
pub fn resolve_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for part in path.split('.') {
        current = current.as_mapping()?.get(part)?;
    }
    Some(current)
}
