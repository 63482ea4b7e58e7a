//! Plan summary types for listings.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, ProgressState};
use crate::registry::StepRegistry;

/// Summary information about a plan with progress statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub id: String,
    /// Project name
    pub name: String,
    /// Author's user id
    pub author: String,
    /// Last update timestamp
    pub last_modified: Timestamp,
    /// Number of wizard steps, fixed and user-defined
    pub total_steps: u32,
    /// Number of completed wizard steps
    pub completed_steps: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let registry = StepRegistry::for_plan(plan);
        let total_steps = registry.len() as u32;
        let completed_steps = registry
            .iter()
            .filter(|step| plan.progress.get(&step.id) == ProgressState::Completed)
            .count() as u32;

        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            author: plan.author.clone(),
            last_modified: plan.last_modified,
            total_steps,
            completed_steps,
        }
    }
}
