//! Plan housekeeping operations.

use log::info;

use super::Designer;
use crate::{
    display::PlanSummaries,
    error::{DesignerError, Result},
    models::{Plan, PlanSummary},
    params::{CreatePlan, DeletePlan, PlanId},
    session::SessionContext,
};

impl Designer {
    /// Creates an empty plan owned by the caller.
    ///
    /// # Errors
    ///
    /// Returns `DesignerError::InvalidInput` if the name is blank.
    pub async fn create_plan(&self, ctx: &SessionContext, params: &CreatePlan) -> Result<Plan> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err(DesignerError::invalid_input("name").with_reason("Plan name cannot be empty"));
        }
        let plan = self.store.create(ctx, name).await?;
        info!("Created plan {} ({})", plan.id, plan.name);
        Ok(plan)
    }

    /// Lists the plans the caller can read, most recently modified first.
    pub async fn list_plans(&self, ctx: &SessionContext) -> Result<PlanSummaries> {
        let plans = self.store.list(ctx).await?;
        Ok(PlanSummaries(plans.iter().map(PlanSummary::from).collect()))
    }

    /// Loads one plan.
    pub async fn show_plan(&self, ctx: &SessionContext, params: &PlanId) -> Result<Plan> {
        self.store.load(ctx, &params.id).await
    }

    /// Permanently deletes a plan, returning its last state.
    ///
    /// # Errors
    ///
    /// Returns `DesignerError::InvalidInput` if `confirmed` is false.
    pub async fn delete_plan(&self, ctx: &SessionContext, params: &DeletePlan) -> Result<Plan> {
        if !params.confirmed {
            return Err(DesignerError::invalid_input("confirmed").with_reason(
                "Plan deletion requires explicit confirmation. Pass --confirm to proceed with permanent deletion.",
            ));
        }
        let plan = self.store.delete(ctx, &params.id).await?;
        info!("Deleted plan {}", plan.id);
        Ok(plan)
    }
}
