//! Request types for partial plan updates.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One field of a plan to overwrite with a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldUpdate {
    /// Top-level plan field name
    pub field_name: String,
    /// Replacement value, in the plan document's JSON shape
    pub value: Value,
}

impl FieldUpdate {
    /// Create a field update.
    ///
    /// ```rust
    /// use designer_core::models::FieldUpdate;
    /// use serde_json::json;
    ///
    /// let update = FieldUpdate::new("name", json!("My VE"));
    /// assert_eq!(update.field_name, "name");
    /// ```
    pub fn new(field_name: impl Into<String>, value: Value) -> Self {
        Self {
            field_name: field_name.into(),
            value,
        }
    }
}
