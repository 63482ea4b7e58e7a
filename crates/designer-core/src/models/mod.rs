//! Data models for plans, wizard steps and progress.
//!
//! Display implementations for these models live in
//! [`crate::display::models`] so presentation stays out of the data
//! definitions.
//!
//! # Examples
//!
//! ```rust
//! use designer_core::models::{Plan, ProgressState};
//!
//! let mut plan = Plan::new("p1", "alice", "My VE");
//! plan.progress.mark_completed("name");
//!
//! assert_eq!(plan.progress.get("name"), ProgressState::Completed);
//! assert_eq!(plan.progress.get("partners"), ProgressState::NotStarted);
//! ```

pub mod plan;
pub mod progress;
pub mod requests;
pub mod step;
pub mod summary;

#[cfg(test)]
mod tests;

pub use plan::{Institution, Plan, PlanStep, TargetGroup, Task};
pub use progress::{Progress, ProgressState};
pub use requests::FieldUpdate;
pub use step::{StepDefinition, StepKind};
pub use summary::PlanSummary;
