//! Core library of the VE-Designer: the step-by-step wizard in which
//! teachers plan a virtual exchange.
//!
//! A plan is edited one step at a time. Each step page seeds a form from its
//! slice of the plan, validates the edits, persists them together with the
//! step's progress marker and only then navigates on.
//!
//! - [`models`]: plan documents, progress markers and step definitions
//! - [`registry`]: ordered fixed and user-defined wizard steps
//! - [`form`]: form models, validation rules and per-step schemas
//! - [`wizard`]: the submit gate state machine and page controller
//! - [`nav`]: side progress navigation
//! - [`store`]: plan persistence (SQLite, VE-Collab backend, cache)
//! - [`designer`]: the high-level API used by the `ved` CLI
//! - [`display`]: markdown rendering for terminal output
//!
//! # Quick Start
//!
//! ```rust
//! use designer_core::{
//!     params::{CreatePlan, SubmitStep},
//!     session::SessionContext,
//!     wizard::Destination,
//!     DesignerBuilder, FieldUpdate,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let designer = DesignerBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//! let ctx = SessionContext::new("alice");
//!
//! let plan = designer
//!     .create_plan(&ctx, &CreatePlan { name: "Draft".to_string() })
//!     .await?;
//!
//! let result = designer
//!     .submit_step(
//!         &ctx,
//!         &SubmitStep {
//!             plan_id: plan.id.clone(),
//!             step_id: "name".to_string(),
//!             set: vec![FieldUpdate::new("name", json!("My VE"))],
//!             to: Destination::Next,
//!             discard: false,
//!         },
//!     )
//!     .await?;
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod designer;
pub mod display;
pub mod error;
pub mod form;
pub mod models;
pub mod nav;
pub mod params;
pub mod registry;
pub mod session;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use db::Database;
pub use designer::{Designer, DesignerBuilder};
pub use display::{CreateResult, DeleteResult, LocalDateTime, PlanSummaries, SubmitResult};
pub use error::{DesignerError, Result};
pub use models::{FieldUpdate, Plan, PlanSummary, Progress, ProgressState, StepDefinition};
pub use nav::SideProgressNav;
pub use registry::StepRegistry;
pub use session::SessionContext;
pub use store::{CachedPlanStore, HttpPlanStore, LocalPlanStore, PlanStore};
pub use wizard::{Destination, Notice, WizardController, WizardState};
