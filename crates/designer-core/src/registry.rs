//! Ordered registry of wizard steps.
//!
//! The registry starts from the fixed VE-Designer pages and is extended with
//! one entry per user-named plan step. Extension is append-only and keyed by
//! the normalized (lower-cased) step name, so a name that appears twice, or
//! collides with a fixed step id, yields a single entry.
//!
//! ```rust
//! use designer_core::registry::StepRegistry;
//!
//! let mut registry = StepRegistry::fixed();
//! assert!(registry.append_user_step("Kickoff"));
//! assert!(!registry.append_user_step("kickoff"));
//!
//! let kickoff = registry.get("kickoff").unwrap();
//! assert_eq!(kickoff.route, "/step-data/Kickoff");
//! ```

use std::collections::HashMap;

use crate::models::{Plan, StepDefinition, StepKind};

/// Route prefix of the pages for user-defined steps.
pub const USER_STEP_ROUTE_PREFIX: &str = "/step-data/";

/// A step compiled into the registry.
#[derive(Debug, Clone, Copy)]
pub struct FixedStep {
    pub id: &'static str,
    pub label: &'static str,
    pub route: &'static str,
}

/// The fixed VE-Designer pages, in wizard order.
pub const FIXED_STEPS: &[FixedStep] = &[
    FixedStep { id: "name", label: "Project Name", route: "/name" },
    FixedStep { id: "partners", label: "Partners", route: "/partners" },
    FixedStep { id: "institutions", label: "Institutions", route: "/institutions" },
    FixedStep { id: "target_groups", label: "Target Groups", route: "/target-groups" },
    FixedStep { id: "learning_goals", label: "Learning Goals", route: "/learning-goals" },
    FixedStep { id: "topics", label: "Topics", route: "/topics" },
    FixedStep { id: "languages", label: "Languages", route: "/languages" },
    FixedStep { id: "realization", label: "Realization", route: "/realization" },
    FixedStep { id: "learning_env", label: "Learning Environment", route: "/learning-environment" },
    FixedStep { id: "step_names", label: "Step Names", route: "/step-names" },
    FixedStep { id: "finish", label: "Finish", route: "/finish" },
];

/// Normalizes a user-chosen step name into a step id.
pub fn normalize_step_id(name: &str) -> String {
    name.to_lowercase()
}

/// Append-only ordered map from step id to step definition.
#[derive(Debug, Clone)]
pub struct StepRegistry {
    entries: Vec<StepDefinition>,
    index: HashMap<String, usize>,
}

impl StepRegistry {
    /// Registry holding only the fixed steps.
    pub fn fixed() -> Self {
        let mut registry = Self {
            entries: Vec::with_capacity(FIXED_STEPS.len()),
            index: HashMap::with_capacity(FIXED_STEPS.len()),
        };
        for step in FIXED_STEPS {
            registry.push(StepDefinition {
                id: step.id.to_string(),
                label: step.label.to_string(),
                route: step.route.to_string(),
                kind: StepKind::Fixed,
            });
        }
        registry
    }

    /// Registry holding the fixed steps followed by the plan's named steps.
    pub fn for_plan(plan: &Plan) -> Self {
        let mut registry = Self::fixed();
        registry.extend_from_plan(plan);
        registry
    }

    /// Appends every user-named step of `plan` not yet registered.
    pub fn extend_from_plan(&mut self, plan: &Plan) {
        for step in &plan.steps {
            self.append_user_step(&step.name);
        }
    }

    /// Appends a user-defined step derived from `name`.
    ///
    /// Returns `false` when the name is blank or its normalized id is
    /// already registered.
    pub fn append_user_step(&mut self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        let id = normalize_step_id(name);
        if self.index.contains_key(&id) {
            return false;
        }
        self.push(StepDefinition {
            id,
            label: name.to_string(),
            route: format!("{USER_STEP_ROUTE_PREFIX}{}", urlencoding::encode(name)),
            kind: StepKind::UserDefined,
        });
        true
    }

    fn push(&mut self, step: StepDefinition) {
        self.index.insert(step.id.clone(), self.entries.len());
        self.entries.push(step);
    }

    /// Looks up a step by id.
    pub fn get(&self, id: &str) -> Option<&StepDefinition> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Looks up a step by its page route.
    pub fn by_route(&self, route: &str) -> Option<&StepDefinition> {
        self.entries.iter().find(|step| step.route == route)
    }

    /// Position of a step in wizard order.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// The step after `id`, if any.
    pub fn next(&self, id: &str) -> Option<&StepDefinition> {
        self.position(id).and_then(|i| self.entries.get(i + 1))
    }

    /// The step before `id`, if any.
    pub fn previous(&self, id: &str) -> Option<&StepDefinition> {
        self.position(id)
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.entries.get(i))
    }

    /// Number of registered steps.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty (never true for a built registry).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over steps in wizard order.
    pub fn iter(&self) -> std::slice::Iter<'_, StepDefinition> {
        self.entries.iter()
    }

    /// Iterate over the ids of the fixed steps.
    pub fn fixed_ids() -> impl Iterator<Item = &'static str> {
        FIXED_STEPS.iter().map(|step| step.id)
    }
}

impl<'a> IntoIterator for &'a StepRegistry {
    type Item = &'a StepDefinition;
    type IntoIter = std::slice::Iter<'a, StepDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanStep;

    fn plan_with_steps(names: &[&str]) -> Plan {
        let mut plan = Plan::new("p1", "alice", "My VE");
        plan.steps = names
            .iter()
            .map(|name| PlanStep {
                name: (*name).to_string(),
                ..Default::default()
            })
            .collect();
        plan
    }

    #[test]
    fn test_fixed_registry_order() {
        let registry = StepRegistry::fixed();
        let ids: Vec<&str> = registry.iter().map(|s| s.id.as_str()).collect();
        let expected: Vec<&str> = StepRegistry::fixed_ids().collect();
        assert_eq!(ids, expected);
        assert_eq!(registry.position("name"), Some(0));
    }

    #[test]
    fn test_duplicate_user_steps_collapse() {
        let registry = StepRegistry::for_plan(&plan_with_steps(&["Kickoff", "Kickoff"]));
        let kickoffs: Vec<_> = registry.iter().filter(|s| s.id == "kickoff").collect();
        assert_eq!(kickoffs.len(), 1);
        assert_eq!(registry.len(), FIXED_STEPS.len() + 1);
    }

    #[test]
    fn test_dedupe_is_case_insensitive() {
        let registry = StepRegistry::for_plan(&plan_with_steps(&["Kickoff", "KICKOFF", "Wrap-up"]));
        assert_eq!(registry.len(), FIXED_STEPS.len() + 2);
        assert_eq!(registry.get("kickoff").unwrap().label, "Kickoff");
    }

    #[test]
    fn test_user_step_cannot_shadow_fixed_step() {
        let mut registry = StepRegistry::fixed();
        assert!(!registry.append_user_step("Name"));
        assert_eq!(registry.get("name").unwrap().kind, StepKind::Fixed);
    }

    #[test]
    fn test_blank_names_are_skipped() {
        let registry = StepRegistry::for_plan(&plan_with_steps(&["", "   "]));
        assert_eq!(registry.len(), FIXED_STEPS.len());
    }

    #[test]
    fn test_user_step_route_is_percent_encoded() {
        let mut registry = StepRegistry::fixed();
        registry.append_user_step("Phase 1/Intro");
        let step = registry.get("phase 1/intro").unwrap();
        assert_eq!(step.route, "/step-data/Phase%201%2FIntro");
        assert!(step.is_user_defined());
        assert_eq!(registry.by_route("/step-data/Phase%201%2FIntro"), Some(step));
    }

    #[test]
    fn test_next_and_previous() {
        let registry = StepRegistry::for_plan(&plan_with_steps(&["Kickoff"]));
        assert_eq!(registry.next("name").unwrap().id, "partners");
        assert!(registry.previous("name").is_none());
        assert_eq!(registry.next("finish").unwrap().id, "kickoff");
        assert!(registry.next("kickoff").is_none());
    }
}
