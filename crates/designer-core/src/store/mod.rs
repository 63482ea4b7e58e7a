//! Plan document accessors.
//!
//! A [`PlanStore`] loads and partially updates plan documents on behalf of an
//! explicit [`SessionContext`]. Three implementations are provided:
//!
//! - [`LocalPlanStore`]: SQLite file, used offline and in tests
//! - [`HttpPlanStore`]: the VE-Collab backend's `/planner` endpoints
//! - [`CachedPlanStore`]: wraps another store and keeps loaded plans until
//!   they are updated
//!
//! ```text
//! ┌──────────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ WizardController │───▶│ CachedPlanStore  │───▶│ Local / Http     │
//! └──────────────────┘    └──────────────────┘    └──────────────────┘
//! ```
//!
//! Concurrent writers are not detected: the last `update_fields` call wins
//! for each field it names.

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{FieldUpdate, Plan},
    session::SessionContext,
};

pub mod cache;
pub mod http;
pub mod local;

pub use cache::CachedPlanStore;
pub use http::HttpPlanStore;
pub use local::LocalPlanStore;

/// Access to persisted plan documents.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Loads a plan.
    ///
    /// # Errors
    ///
    /// `PlanNotFound` for unknown ids, `NotAuthorized` without read access,
    /// `NotAuthenticated` without a session.
    async fn load(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan>;

    /// Overwrites the named top-level fields of a plan in one call.
    ///
    /// Either every update is applied or none is.
    async fn update_fields(
        &self,
        ctx: &SessionContext,
        plan_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()>;

    /// Creates an empty plan owned by the caller.
    async fn create(&self, ctx: &SessionContext, name: &str) -> Result<Plan>;

    /// Lists the plans the caller may read.
    async fn list(&self, ctx: &SessionContext) -> Result<Vec<Plan>>;

    /// Permanently deletes a plan, returning its last state.
    async fn delete(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan>;
}
