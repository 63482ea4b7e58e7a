//! Declarative field validation rules.
//!
//! Rules target a dotted path into the form model. A `*` segment fans out
//! over every item of a list, so `target_groups.*.age_min` checks the lower
//! age bound of each target group. Rules other than [`Rule::Required`] skip
//! values that are absent or null.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A single constraint on a form value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// Value must be present and not blank
    Required,
    /// String length in characters, inclusive bounds
    Length { min: usize, max: usize },
    /// Integer range, inclusive bounds
    Range { min: i64, max: i64 },
    /// Upper bound on the number of list items
    MaxItems(usize),
    /// String must be one of the listed values
    OneOf(&'static [&'static str]),
}

/// A rule bound to a field path.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub path: &'static str,
    pub rule: Rule,
}

impl FieldRule {
    pub const fn new(path: &'static str, rule: Rule) -> Self {
        Self { path, rule }
    }
}

/// A failed rule, reported against the concrete path of the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Whether a value counts as empty input.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.values().all(is_blank),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Resolves `path` against `root`, expanding `*` over list items.
///
/// Yields `(concrete_path, value)` pairs; `value` is `None` where the path
/// leads nowhere.
fn resolve<'a>(root: &'a Value, path: &str) -> Vec<(String, Option<&'a Value>)> {
    let mut current: Vec<(String, Option<&'a Value>)> = vec![(String::new(), Some(root))];

    for segment in path.split('.') {
        let mut next = Vec::new();
        for (prefix, value) in current {
            let join = |s: &str| {
                if prefix.is_empty() {
                    s.to_string()
                } else {
                    format!("{prefix}.{s}")
                }
            };
            if segment == "*" {
                if let Some(Value::Array(items)) = value {
                    for (i, item) in items.iter().enumerate() {
                        next.push((join(&i.to_string()), Some(item)));
                    }
                }
            } else {
                let child = value.and_then(|v| v.get(segment)).filter(|v| !v.is_null());
                next.push((join(segment), child));
            }
        }
        current = next;
    }

    current
}

impl FieldRule {
    /// Checks the rule against `root`, appending failures to `errors`.
    pub fn check(&self, root: &Value, errors: &mut Vec<ValidationError>) {
        for (field, value) in resolve(root, self.path) {
            if let Some(message) = self.rule.violation(value) {
                errors.push(ValidationError { field, message });
            }
        }
    }
}

impl Rule {
    fn violation(&self, value: Option<&Value>) -> Option<String> {
        if let Rule::Required = self {
            return match value {
                Some(v) if !is_blank(v) => None,
                _ => Some("is required".to_string()),
            };
        }

        let value = value?;
        match self {
            Rule::Required => None,
            Rule::Length { min, max } => {
                let Some(s) = value.as_str() else {
                    return Some("must be text".to_string());
                };
                let len = s.chars().count();
                (len < *min || len > *max)
                    .then(|| format!("must be between {min} and {max} characters"))
            }
            Rule::Range { min, max } => {
                let Some(n) = value.as_i64() else {
                    return Some("must be a whole number".to_string());
                };
                (n < *min || n > *max).then(|| format!("must be between {min} and {max}"))
            }
            Rule::MaxItems(max) => {
                let Some(items) = value.as_array() else {
                    return Some("must be a list".to_string());
                };
                (items.len() > *max).then(|| format!("must have at most {max} entries"))
            }
            Rule::OneOf(allowed) => {
                let ok = value.as_str().is_some_and(|s| allowed.contains(&s));
                (!ok).then(|| format!("must be one of: {}", allowed.join(", ")))
            }
        }
    }
}
