//! Display implementations for domain models.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{Plan, PlanSummary, ProgressState, StepDefinition},
    registry::StepRegistry,
};

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.route)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "## {title}")?;
    writeln!(f)?;
    for item in items {
        writeln!(f, "- {item}")?;
    }
    writeln!(f)
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.is_empty() {
            "(unnamed plan)"
        } else {
            self.name.as_str()
        };
        writeln!(f, "# {name}")?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Author: {}", self.author)?;
        if let Some(realization) = &self.realization {
            writeln!(f, "- Realization: {realization}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.creation_timestamp))?;
        writeln!(f, "- Modified: {}", LocalDateTime(&self.last_modified))?;
        writeln!(f)?;

        write_list(f, "Partners", &self.partners)?;

        if !self.institutions.is_empty() {
            writeln!(f, "## Institutions")?;
            writeln!(f)?;
            for institution in &self.institutions {
                match &institution.country {
                    Some(country) => writeln!(f, "- {} ({country})", institution.name)?,
                    None => writeln!(f, "- {}", institution.name)?,
                }
            }
            writeln!(f)?;
        }

        if !self.target_groups.is_empty() {
            writeln!(f, "## Target Groups")?;
            writeln!(f)?;
            for group in &self.target_groups {
                match (group.age_min, group.age_max) {
                    (Some(min), Some(max)) => writeln!(f, "- {} (age {min}-{max})", group.name)?,
                    _ => writeln!(f, "- {}", group.name)?,
                }
            }
            writeln!(f)?;
        }

        write_list(f, "Learning Goals", &self.learning_goals)?;
        write_list(f, "Topics", &self.topics)?;
        write_list(f, "Languages", &self.languages)?;

        if let Some(env) = &self.learning_env {
            writeln!(f, "## Learning Environment")?;
            writeln!(f)?;
            writeln!(f, "{env}")?;
            writeln!(f)?;
        }

        writeln!(f, "## Progress")?;
        writeln!(f)?;
        for step in &StepRegistry::for_plan(self) {
            writeln!(
                f,
                "- {} {}",
                self.progress.get(&step.id).with_icon(),
                step.label
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {} (ID: {}) ({}/{})",
            self.name, self.id, self.completed_steps, self.total_steps
        )?;
        writeln!(f)?;
        writeln!(f, "- **Author**: {}", self.author)?;
        writeln!(f, "- **Modified**: {}", LocalDateTime(&self.last_modified))?;
        writeln!(f)
    }
}
