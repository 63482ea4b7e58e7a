//! High-level designer API used by the CLI.
//!
//! [`Designer`] ties a [`PlanStore`] to the wizard: plan housekeeping
//! (create, list, show, delete) lives in [`plan_handlers`], step pages and
//! navigation in [`step_handlers`]. Every call takes an explicit
//! [`SessionContext`](crate::session::SessionContext).
//!
//! ```text
//! ┌─────────────────┐    ┌──────────────────┐    ┌─────────────────┐
//! │    Handlers     │    │ WizardController │    │    PlanStore    │
//! │ (plan_handlers, │───▶│  (submit gate)   │───▶│ (local / http,  │
//! │  step_handlers) │    │                  │    │  cached)        │
//! └─────────────────┘    └──────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use designer_core::{params::CreatePlan, session::SessionContext, DesignerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let designer = DesignerBuilder::new()
//!     .with_database_path(Some("designer.db"))
//!     .build()
//!     .await?;
//!
//! let ctx = SessionContext::new("alice");
//! let plan = designer
//!     .create_plan(&ctx, &CreatePlan { name: "My VE".to_string() })
//!     .await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::store::PlanStore;

pub mod builder;
pub mod plan_handlers;
pub mod step_handlers;


pub use builder::DesignerBuilder;

/// Entry point for plan and wizard operations.
#[derive(Clone)]
pub struct Designer {
    store: Arc<dyn PlanStore>,
}

impl Designer {
    /// Designer over an already configured store.
    pub fn with_store(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// The underlying plan store.
    pub fn store(&self) -> &Arc<dyn PlanStore> {
        &self.store
    }
}
