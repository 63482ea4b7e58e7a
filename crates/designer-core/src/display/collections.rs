//! Collection wrapper types for displaying groups of domain objects.

use std::fmt;

use crate::models::PlanSummary;

/// Newtype wrapper for displaying a list of plan summaries.
///
/// ```rust
/// use designer_core::{
///     display::PlanSummaries,
///     models::{Plan, PlanSummary},
/// };
///
/// let plan = Plan::new("1", "alice", "My VE");
/// let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);
/// assert!(summaries.to_string().contains("My VE"));
/// assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
/// ```
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plans found.");
        }
        for plan in &self.0 {
            write!(f, "{plan}")?;
        }
        Ok(())
    }
}
