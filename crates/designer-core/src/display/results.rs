//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::{
    form::FormModel,
    models::{Plan, StepDefinition},
    wizard::{Notice, WizardState},
};

/// Outcome of a create operation.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created plan with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Plan> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted plan '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

/// Outcome of submitting one wizard step.
pub struct SubmitResult {
    pub step: StepDefinition,
    pub state: WizardState,
    pub notices: Vec<Notice>,
    /// The form as it stands after the submit
    pub form: FormModel,
}

impl fmt::Display for SubmitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.step.label)?;
        writeln!(f)?;
        for notice in &self.notices {
            writeln!(f, "> {notice}")?;
            writeln!(f)?;
        }
        write!(f, "{}", self.state)?;
        if self.state == WizardState::Ready {
            writeln!(f)?;
            write!(f, "{}", self.form)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::StepKind, wizard::Navigation};

    fn step() -> StepDefinition {
        StepDefinition {
            id: "name".to_string(),
            label: "Project Name".to_string(),
            route: "/name".to_string(),
            kind: StepKind::Fixed,
        }
    }

    #[test]
    fn test_delete_result() {
        let plan = Plan::new("p1", "alice", "My VE");
        assert_eq!(
            DeleteResult::new(plan).to_string(),
            "Deleted plan 'My VE' (ID: p1)\n"
        );
    }

    #[test]
    fn test_submit_result_navigating() {
        let result = SubmitResult {
            step: step(),
            state: WizardState::Navigating {
                to: Navigation {
                    step_id: "partners".to_string(),
                    route: "/partners".to_string(),
                    planner_id: "p1".to_string(),
                },
                persisted: true,
            },
            notices: vec![],
            form: FormModel::default(),
        };
        let output = result.to_string();
        assert!(output.starts_with("# Project Name"));
        assert!(output.contains("Saved. Continue at /partners?plannerId=p1"));
    }

    #[test]
    fn test_submit_result_shows_notices_and_form() {
        let result = SubmitResult {
            step: step(),
            state: WizardState::Ready,
            notices: vec![Notice::PermissionDenied],
            form: FormModel::default(),
        };
        let output = result.to_string();
        assert!(output.contains("> You do not have permission to edit this plan."));
        assert!(output.contains("This step has no fields."));
    }
}
