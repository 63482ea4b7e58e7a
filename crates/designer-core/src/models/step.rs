//! Wizard step definitions.

use serde::{Deserialize, Serialize};

/// Where a step definition comes from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Compiled into the registry
    Fixed,

    /// Derived from a step the user named in the plan
    UserDefined,
}

/// Immutable description of one wizard page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepDefinition {
    /// Stable identifier, also the key in the progress map
    pub id: String,

    /// Human-readable label shown in the navigation
    pub label: String,

    /// Route of the step's page
    pub route: String,

    /// Fixed or user-defined
    pub kind: StepKind,
}

impl StepDefinition {
    /// Whether this step was derived from a user-named plan step.
    pub fn is_user_defined(&self) -> bool {
        self.kind == StepKind::UserDefined
    }
}
