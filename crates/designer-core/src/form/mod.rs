//! Form models seeded from plan slices, and their validation.
//!
//! Each wizard step edits one slice of the plan: a handful of top-level plan
//! fields for fixed steps, or a single entry of `Plan.steps` for a
//! user-defined step. The slice is copied into a [`FormModel`], edited
//! locally, validated against the step's [`StepSchema`] and turned back into
//! [`FieldUpdate`](crate::models::FieldUpdate)s on submit.

use std::fmt;

use serde_json::{Map, Value};

pub mod rules;
pub mod schema;

pub use rules::{is_blank, FieldRule, Rule, ValidationError};
pub use schema::{StepSchema, StepSlice};

/// Local, editable copy of one plan slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormModel {
    values: Map<String, Value>,
}

impl FormModel {
    /// Build a form from field values.
    pub fn from_map(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// Value of a field, `Null` if absent.
    pub fn get(&self, field: &str) -> &Value {
        self.values.get(field).unwrap_or(&Value::Null)
    }

    /// Whether the form has a field with this name.
    pub fn has_field(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    /// Overwrites a field value.
    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.values.insert(field.into(), value);
    }

    /// Names of the fields, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterate over `(field, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the form has no fields at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every field holds empty input.
    pub fn is_blank(&self) -> bool {
        self.values.values().all(is_blank)
    }

    /// The form as a JSON object, for rule evaluation.
    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }

    /// Fields whose value differs from `seed`.
    pub fn changed_fields<'a>(&'a self, seed: &'a FormModel) -> impl Iterator<Item = (&'a str, &'a Value)> {
        self.iter().filter(move |(field, value)| seed.get(field) != *value)
    }
}

impl fmt::Display for FormModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.values.is_empty() {
            return writeln!(f, "This step has no fields.");
        }
        for (field, value) in &self.values {
            let rendered = match value {
                Value::Null => "_empty_".to_string(),
                Value::String(s) if s.is_empty() => "_empty_".to_string(),
                Value::String(s) => s.clone(),
                other => format!("`{other}`"),
            };
            writeln!(f, "- **{field}**: {rendered}")?;
        }
        Ok(())
    }
}
