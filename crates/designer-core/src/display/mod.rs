//! Markdown rendering of plans and operation results.
//!
//! Domain models implement `Display` directly; collections and operation
//! outcomes are rendered through newtype wrappers so the CLI can print any
//! of them through the same terminal skin.
//!
//! ```rust
//! use designer_core::{display::CreateResult, models::Plan};
//!
//! let plan = Plan::new("7", "alice", "Climate Exchange");
//! let output = CreateResult::new(plan).to_string();
//! assert!(output.contains("Created plan with ID: 7"));
//! assert!(output.contains("# Climate Exchange"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::PlanSummaries;
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, SubmitResult};
