//! Parameter structures for designer operations.
//!
//! These carry no interface-specific derives. The CLI defines its own clap
//! argument structs and converts them into these with `From`, so the core
//! stays free of argument-parsing concerns.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use crate::{models::FieldUpdate, wizard::Destination};

/// Parameters for creating a plan.
#[derive(Debug, Clone, Default)]
pub struct CreatePlan {
    /// Project name of the new plan
    pub name: String,
}

/// Parameters for operations requiring just a plan id.
#[derive(Debug, Clone, Default)]
pub struct PlanId {
    pub id: String,
}

/// Parameters for permanently deleting a plan.
#[derive(Debug, Clone, Default)]
pub struct DeletePlan {
    pub id: String,
    /// Must be `true`; deletion cannot be undone
    pub confirmed: bool,
}

/// Parameters for opening one step of a plan.
#[derive(Debug, Clone, Default)]
pub struct ShowStep {
    pub plan_id: String,
    pub step_id: String,
}

/// Parameters for the side progress navigation of a plan.
#[derive(Debug, Clone, Default)]
pub struct ShowNav {
    pub plan_id: String,
    /// Step whose entry is marked current
    pub step_id: Option<String>,
}

/// Parameters for editing and submitting one step.
#[derive(Debug, Clone)]
pub struct SubmitStep {
    pub plan_id: String,
    pub step_id: String,
    /// Form edits applied before submitting, in order
    pub set: Vec<FieldUpdate>,
    /// Where to go after a successful submit
    pub to: Destination,
    /// Leave without saving when the form is invalid
    pub discard: bool,
}
