//! Side progress navigation.

use std::fmt;

use crate::{
    models::{Plan, Progress, ProgressState, StepDefinition},
    registry::StepRegistry,
};

/// One entry of the side navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub step: StepDefinition,
    pub state: ProgressState,
    /// Whether this is the page being shown
    pub current: bool,
}

/// Every wizard step with its progress marker, in wizard order.
#[derive(Debug, Clone, PartialEq)]
pub struct SideProgressNav {
    entries: Vec<NavEntry>,
}

impl SideProgressNav {
    /// Builds the navigation from a registry and a progress map.
    ///
    /// `current_route` may carry a query string; only the path is compared.
    pub fn new(registry: &StepRegistry, progress: &Progress, current_route: Option<&str>) -> Self {
        let current_path = current_route.map(|route| route.split('?').next().unwrap_or(route));
        let entries = registry
            .iter()
            .map(|step| NavEntry {
                state: progress.get(&step.id),
                current: current_path == Some(step.route.as_str()),
                step: step.clone(),
            })
            .collect();
        Self { entries }
    }

    /// Navigation over the fixed steps plus the plan's own steps.
    pub fn for_plan(plan: &Plan, current_route: Option<&str>) -> Self {
        Self::new(&StepRegistry::for_plan(plan), &plan.progress, current_route)
    }

    /// Entries in wizard order.
    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    /// Entry for a step id.
    pub fn get(&self, step_id: &str) -> Option<&NavEntry> {
        self.entries.iter().find(|entry| entry.step.id == step_id)
    }

    /// The entry of the page being shown.
    pub fn current(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|entry| entry.current)
    }

    /// Number of completed steps.
    pub fn completed(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.state == ProgressState::Completed)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for SideProgressNav {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Steps ({}/{} completed)", self.completed(), self.len())?;
        writeln!(f)?;
        for entry in &self.entries {
            let marker = if entry.current { " **← current**" } else { "" };
            writeln!(
                f,
                "- {} **{}** `{}`{marker}",
                entry.state.with_icon(),
                entry.step.label,
                entry.step.route
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanStep;

    fn plan() -> Plan {
        let mut plan = Plan::new("p1", "alice", "My VE");
        plan.steps = ["Kickoff", "Kickoff"]
            .iter()
            .map(|name| PlanStep {
                name: name.to_string(),
                ..Default::default()
            })
            .collect();
        plan.progress.mark_completed("name");
        plan
    }

    #[test]
    fn test_duplicate_steps_yield_one_entry() {
        let nav = SideProgressNav::for_plan(&plan(), None);
        let kickoffs = nav
            .entries()
            .iter()
            .filter(|entry| entry.step.id == "kickoff")
            .count();
        assert_eq!(kickoffs, 1);
        assert_eq!(nav.entries().last().unwrap().step.id, "kickoff");
    }

    #[test]
    fn test_states_default_to_not_started() {
        let nav = SideProgressNav::for_plan(&plan(), None);
        assert_eq!(nav.get("name").unwrap().state, ProgressState::Completed);
        assert_eq!(nav.get("topics").unwrap().state, ProgressState::NotStarted);
        assert_eq!(nav.completed(), 1);
    }

    #[test]
    fn test_current_matches_route_without_query() {
        let nav = SideProgressNav::for_plan(&plan(), Some("/step-data/Kickoff?plannerId=p1"));
        assert_eq!(nav.current().unwrap().step.id, "kickoff");
        assert_eq!(nav.entries().iter().filter(|e| e.current).count(), 1);
    }

    #[test]
    fn test_display_marks_current_entry() {
        let nav = SideProgressNav::for_plan(&plan(), Some("/partners"));
        let rendered = nav.to_string();
        assert!(rendered.contains("## Steps (1/12 completed)"));
        assert!(rendered.contains("**Partners** `/partners` **← current**"));
    }
}
