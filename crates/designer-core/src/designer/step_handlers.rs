//! Wizard step operations.

use log::debug;

use super::Designer;
use crate::{
    display::SubmitResult,
    error::{DesignerError, Result},
    nav::SideProgressNav,
    params::{ShowNav, ShowStep, SubmitStep},
    registry::{normalize_step_id, StepRegistry},
    session::SessionContext,
    wizard::{WizardController, WizardState},
};

impl Designer {
    /// Unmounted controller for one step page.
    pub fn controller(&self, ctx: &SessionContext, plan_id: &str, step_id: &str) -> WizardController {
        WizardController::new(self.store.clone(), ctx.clone(), plan_id, step_id)
    }

    /// Mounted controller for one step page, form seeded from the plan.
    pub async fn open_step(&self, ctx: &SessionContext, params: &ShowStep) -> Result<WizardController> {
        let mut controller = self.controller(ctx, &params.plan_id, &params.step_id);
        controller.mount().await?;
        Ok(controller)
    }

    /// Side progress navigation of a plan.
    ///
    /// # Errors
    ///
    /// Returns `DesignerError::InvalidInput` if `step_id` names no step of
    /// the plan.
    pub async fn side_nav(&self, ctx: &SessionContext, params: &ShowNav) -> Result<SideProgressNav> {
        let plan = self.store.load(ctx, &params.plan_id).await?;
        let registry = StepRegistry::for_plan(&plan);
        let route = match &params.step_id {
            Some(step_id) => {
                let step = registry.get(&normalize_step_id(step_id)).ok_or_else(|| {
                    DesignerError::invalid_input("step")
                        .with_reason(format!("unknown step '{step_id}'"))
                })?;
                Some(step.route.as_str())
            }
            None => None,
        };
        Ok(SideProgressNav::new(&registry, &plan.progress, route))
    }

    /// Edits a step, submits it and follows the submit gate.
    ///
    /// An invalid form ends in the leave confirmation unless `discard` is
    /// set, in which case the edits are dropped and the wizard navigates
    /// without saving.
    pub async fn submit_step(&self, ctx: &SessionContext, params: &SubmitStep) -> Result<SubmitResult> {
        let mut controller = self
            .open_step(
                ctx,
                &ShowStep {
                    plan_id: params.plan_id.clone(),
                    step_id: params.step_id.clone(),
                },
            )
            .await?;

        for update in &params.set {
            controller.set_field(&update.field_name, update.value.clone())?;
        }

        controller.submit(params.to.clone()).await?;
        if params.discard && matches!(controller.state(), WizardState::ShowingLeaveConfirmation { .. }) {
            debug!("Discarding invalid edits of step {}", params.step_id);
            controller.confirm_leave()?;
        }

        let step = controller.step().cloned().ok_or_else(|| {
            DesignerError::invalid_input("step")
                .with_reason(format!("unknown step '{}'", params.step_id))
        })?;

        Ok(SubmitResult {
            step,
            state: controller.state().clone(),
            notices: controller.take_notices(),
            form: controller.form().clone(),
        })
    }
}
