//! Plan document definition and partial-update application.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{FieldUpdate, Progress};
use crate::error::{DesignerError, Result};

/// Fields a wizard step may never overwrite through a partial update.
pub const PROTECTED_FIELDS: &[&str] = &[
    "_id",
    "author",
    "read_access",
    "write_access",
    "creation_timestamp",
    "last_modified",
];

/// The virtual exchange project record edited across wizard steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Plan {
    /// Unique identifier of the plan
    #[serde(rename = "_id")]
    pub id: String,

    /// User id of the plan's author
    pub author: String,

    /// Users allowed to read the plan (the author is always allowed)
    pub read_access: Vec<String>,

    /// Users allowed to edit the plan (the author is always allowed)
    pub write_access: Vec<String>,

    /// Project name
    pub name: String,

    /// Participating institutions
    pub institutions: Vec<Institution>,

    /// User names of the partners planning together
    pub partners: Vec<String>,

    /// Target groups of learners
    pub target_groups: Vec<TargetGroup>,

    /// Learning goals of the exchange
    pub learning_goals: Vec<String>,

    /// Topics covered
    pub topics: Vec<String>,

    /// Languages used in the exchange
    pub languages: Vec<String>,

    /// Format of the realization (physical, virtual, hybrid)
    pub realization: Option<String>,

    /// Description of the digital learning environment
    pub learning_env: Option<String>,

    /// User-defined steps ("Etappen"), in order
    pub steps: Vec<PlanStep>,

    /// Per-step completion markers
    pub progress: Progress,

    /// Timestamp when the plan was created (UTC)
    pub creation_timestamp: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub last_modified: Timestamp,
}

/// An institution taking part in the exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Institution {
    pub name: String,
    pub school_type: Option<String>,
    pub country: Option<String>,
    pub departments: Vec<String>,
}

/// A group of learners the exchange addresses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct TargetGroup {
    pub name: String,
    pub age_min: Option<u32>,
    pub age_max: Option<u32>,
    pub experience: Option<String>,
    pub academic_course: Option<String>,
    pub languages: Vec<String>,
}

/// A step the user defined and named themselves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct PlanStep {
    /// Name chosen by the user; the step id is its lower-cased form
    pub name: String,
    /// Workload in hours
    pub workload: u32,
    pub timestamp_from: Option<String>,
    pub timestamp_to: Option<String>,
    pub learning_goal: Option<String>,
    pub learning_activity: Option<String>,
    pub has_tasks: bool,
    pub tasks: Vec<Task>,
    pub evaluation_tools: Vec<String>,
    pub attachments: Vec<String>,
}

/// A task inside a user-defined step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Task {
    pub title: String,
    pub description: Option<String>,
    pub learning_goal: Option<String>,
    pub tools: Vec<String>,
}

impl Plan {
    /// Creates an empty plan owned by `author`.
    pub fn new(id: impl Into<String>, author: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        let author = author.into();
        Self {
            id: id.into(),
            read_access: vec![author.clone()],
            write_access: vec![author.clone()],
            author,
            name: name.into(),
            creation_timestamp: now,
            last_modified: now,
            ..Default::default()
        }
    }

    /// An empty placeholder carrying only the identifier.
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Whether `user` may read this plan.
    pub fn can_read(&self, user: &str) -> bool {
        self.author == user
            || self.read_access.iter().any(|u| u == user)
            || self.write_access.iter().any(|u| u == user)
    }

    /// Whether `user` may edit this plan.
    pub fn can_write(&self, user: &str) -> bool {
        self.author == user || self.write_access.iter().any(|u| u == user)
    }

    /// Index of the user-defined step whose normalized name is `step_id`.
    pub fn user_step_index(&self, step_id: &str) -> Option<usize> {
        self.steps
            .iter()
            .position(|s| crate::registry::normalize_step_id(&s.name) == step_id)
    }

    /// Returns a copy of this plan with all `updates` applied.
    ///
    /// The application is all-or-nothing: an unknown or protected field, or
    /// a value that does not fit the field's type, rejects the whole batch
    /// and leaves `self` untouched.
    pub fn with_updates(&self, updates: &[FieldUpdate]) -> Result<Plan> {
        let mut document = serde_json::to_value(self)?;
        let Value::Object(fields) = &mut document else {
            return Err(DesignerError::Configuration {
                message: "Plan did not serialize to an object".to_string(),
            });
        };

        for update in updates {
            let name = update.field_name.as_str();
            if PROTECTED_FIELDS.contains(&name) {
                return Err(DesignerError::invalid_input(name).with_reason("field is read-only"));
            }
            if !fields.contains_key(name) {
                return Err(DesignerError::invalid_input(name).with_reason("unknown plan field"));
            }
            fields.insert(name.to_string(), update.value.clone());

            // Check each value on its own so the error names the right field
            serde_json::from_value::<Plan>(Value::Object(fields.clone())).map_err(|e| {
                DesignerError::invalid_input(name).with_reason(e.to_string())
            })?;
        }

        Ok(serde_json::from_value(document)?)
    }
}
