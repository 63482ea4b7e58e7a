//! One wizard page visit: load, edit, validate, persist, navigate.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value;

use super::{
    state::{transition, Destination, Navigation, WizardEvent, WizardState},
    Notice,
};
use crate::{
    error::{DesignerError, Result},
    form::{FormModel, StepSchema},
    models::{FieldUpdate, Plan, StepDefinition},
    nav::SideProgressNav,
    registry::{normalize_step_id, StepRegistry},
    session::SessionContext,
    store::PlanStore,
};

/// Drives a single step page of the VE-Designer wizard.
///
/// A controller is created per page visit. [`mount`](Self::mount) loads the
/// plan and seeds the form, [`set_field`](Self::set_field) edits the local
/// form only, and [`submit`](Self::submit) runs the submit gate: a valid form
/// is persisted together with the step's progress marker in one
/// `update_fields` call before navigation happens.
pub struct WizardController {
    store: Arc<dyn PlanStore>,
    ctx: SessionContext,
    plan_id: String,
    step_id: String,
    registry: StepRegistry,
    schema: Option<StepSchema>,
    state: WizardState,
    plan: Plan,
    /// The plan failed to load and `plan` holds placeholder values
    degraded: bool,
    seed: FormModel,
    form: FormModel,
    notices: Vec<Notice>,
}

impl WizardController {
    /// Controller for `step_id` of `plan_id`, not yet mounted.
    pub fn new(
        store: Arc<dyn PlanStore>,
        ctx: SessionContext,
        plan_id: impl Into<String>,
        step_id: &str,
    ) -> Self {
        let plan_id = plan_id.into();
        Self {
            store,
            ctx,
            plan: Plan::placeholder(plan_id.clone()),
            degraded: false,
            plan_id,
            step_id: normalize_step_id(step_id),
            registry: StepRegistry::fixed(),
            schema: None,
            state: WizardState::Loading,
            seed: FormModel::default(),
            form: FormModel::default(),
            notices: Vec::new(),
        }
    }

    /// Loads the plan and seeds the form for the current step.
    ///
    /// A failing load never aborts the page: the wizard continues with an
    /// empty plan and raises a notice.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the step is unknown for this plan.
    pub async fn mount(&mut self) -> Result<()> {
        self.state = WizardState::Loading;
        self.notices.clear();
        self.degraded = false;

        let mut plan = match self.store.load(&self.ctx, &self.plan_id).await {
            Ok(plan) => plan,
            Err(e) => {
                warn!(
                    "Could not load plan {}, continuing with defaults: {e}",
                    self.plan_id
                );
                self.notices.push(Notice::from_load_error(&e));
                self.degraded = true;
                Plan::placeholder(self.plan_id.clone())
            }
        };

        let registry = StepRegistry::for_plan(&plan);
        let step = registry.get(&self.step_id).cloned().ok_or_else(|| {
            DesignerError::invalid_input("step")
                .with_reason(format!("unknown step '{}'", self.step_id))
        })?;
        ensure_progress(&mut plan, &step.id);

        let schema = StepSchema::for_step(&step);
        self.seed = schema.seed(&plan)?;
        self.form = self.seed.clone();
        self.schema = Some(schema);
        self.registry = registry;
        self.plan = plan;

        self.apply(WizardEvent::Loaded)
    }

    /// Changes one field of the local form. Nothing is persisted.
    pub fn set_field(&mut self, field: &str, value: Value) -> Result<()> {
        if self.state != WizardState::Ready {
            return Err(self.rejected("edit"));
        }
        if !self.form.has_field(field) {
            return Err(DesignerError::invalid_input(field)
                .with_reason(format!("not a field of step '{}'", self.step_id)));
        }
        if self.schema.as_ref().is_some_and(|schema| schema.is_read_only(field)) {
            return Err(DesignerError::invalid_input(field)
                .with_reason("rename steps on the step names page"));
        }
        self.form.set(field, value);
        Ok(())
    }

    /// Resolves a destination against the current step order.
    ///
    /// `Next` on the last step and `Back` on the first stay on the current
    /// route.
    pub fn resolve(&self, destination: &Destination) -> Result<Navigation> {
        let current = self.step().ok_or_else(|| {
            DesignerError::invalid_input("step")
                .with_reason(format!("unknown step '{}'", self.step_id))
        })?;

        let target = match destination {
            Destination::Next => self.registry.next(&current.id).unwrap_or(current),
            Destination::Back => self.registry.previous(&current.id).unwrap_or(current),
            Destination::Step(id) => self.registry.get(&normalize_step_id(id)).ok_or_else(|| {
                DesignerError::invalid_input("destination")
                    .with_reason(format!("unknown step '{id}'"))
            })?,
        };

        Ok(Navigation {
            step_id: target.id.clone(),
            route: target.route.clone(),
            planner_id: self.plan_id.clone(),
        })
    }

    /// Runs the submit gate towards `destination`.
    ///
    /// Outcomes:
    /// - optional step with an all-empty form: navigate, nothing persisted
    /// - invalid form: ask for leave confirmation, nothing persisted
    /// - valid form: persist fields and progress, then navigate
    /// - persistence failure: stay `Ready` with a notice, form kept
    pub async fn submit(&mut self, destination: Destination) -> Result<()> {
        if self.state != WizardState::Ready {
            return Err(self.rejected("submit"));
        }
        let schema = self.schema.clone().ok_or_else(|| self.rejected("submit"))?;
        let to = self.resolve(&destination)?;

        if schema.optional && self.form.is_blank() {
            debug!("Step {} left empty, skipping persistence", self.step_id);
            return self.apply(WizardEvent::Skipped { to });
        }

        let errors = schema.validate(&self.plan, &self.form);
        if !errors.is_empty() {
            debug!(
                "Step {} failed validation with {} error(s)",
                self.step_id,
                errors.len()
            );
            return self.apply(WizardEvent::Rejected { to, errors });
        }

        // A placeholder plan must never be written back over the stored one
        if self.degraded {
            match self.store.load(&self.ctx, &self.plan_id).await {
                Ok(mut fresh) => {
                    debug!("Reloaded plan {} before saving", self.plan_id);
                    ensure_progress(&mut fresh, &self.step_id);
                    self.plan = fresh;
                    self.degraded = false;
                }
                Err(e) => {
                    warn!(
                        "Could not reload plan {}, refusing to save over it: {e}",
                        self.plan_id
                    );
                    self.notices.push(Notice::from_error(&e));
                    return self.apply(WizardEvent::PersistFailed);
                }
            }
        }

        let mut updates = schema.updates(&self.plan, &self.seed, &self.form)?;
        let mut progress = self.plan.progress.clone();
        progress.mark_completed(&self.step_id);
        updates.push(FieldUpdate::new("progress", serde_json::to_value(&progress)?));
        let saved = self.plan.with_updates(&updates)?;

        match self
            .store
            .update_fields(&self.ctx, &self.plan_id, &updates)
            .await
        {
            Ok(()) => {
                debug!(
                    "Saved step {} of plan {} ({} field(s))",
                    self.step_id,
                    self.plan_id,
                    updates.len()
                );
                self.plan = saved;
                self.seed = self.form.clone();
                self.apply(WizardEvent::Persisted { to })
            }
            Err(e) => {
                warn!(
                    "Could not save step {} of plan {}: {e}",
                    self.step_id, self.plan_id
                );
                self.notices.push(Notice::from_error(&e));
                self.apply(WizardEvent::PersistFailed)
            }
        }
    }

    /// Submit triggered by a side navigation entry.
    pub async fn select_nav_entry(&mut self, step_id: &str) -> Result<()> {
        self.submit(Destination::Step(step_id.to_string())).await
    }

    /// Leaves despite an invalid form, discarding the edits.
    pub fn confirm_leave(&mut self) -> Result<()> {
        self.apply(WizardEvent::ConfirmLeave)
    }

    /// Stays on the page after an invalid submit.
    pub fn cancel(&mut self) -> Result<()> {
        self.apply(WizardEvent::Cancel)
    }

    fn apply(&mut self, event: WizardEvent) -> Result<()> {
        let event_name = event.name();
        match transition(&self.state, event) {
            Ok(next) => {
                debug!("Wizard {} -> {} on {event_name}", self.state.name(), next.name());
                self.state = next;
                Ok(())
            }
            Err(e) => {
                warn!("Ignoring {event_name} while {}", self.state.name());
                Err(e)
            }
        }
    }

    fn rejected(&self, event: &str) -> DesignerError {
        DesignerError::InvalidTransition {
            state: self.state.name().to_string(),
            event: event.to_string(),
        }
    }

    /// Current state of the submit gate.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Where the wizard is headed, once navigating.
    pub fn navigation(&self) -> Option<&Navigation> {
        self.state.navigation()
    }

    /// The local form model.
    pub fn form(&self) -> &FormModel {
        &self.form
    }

    /// Whether the form differs from what was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.form.changed_fields(&self.seed).next().is_some()
    }

    /// The plan as loaded, plus any edits saved during this visit.
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    /// Definition of the current step, once mounted.
    pub fn step(&self) -> Option<&StepDefinition> {
        self.registry.get(&self.step_id)
    }

    /// Schema of the current step, once mounted.
    pub fn schema(&self) -> Option<&StepSchema> {
        self.schema.as_ref()
    }

    /// Steps of this plan in wizard order.
    pub fn registry(&self) -> &StepRegistry {
        &self.registry
    }

    /// Whether the plan failed to load and placeholder values are shown.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Notices raised since mounting.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Drains the raised notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Side progress navigation for the current step.
    pub fn nav(&self) -> SideProgressNav {
        let route = self.step().map(|step| step.route.as_str());
        SideProgressNav::new(&self.registry, &self.plan.progress, route)
    }
}

/// Adds `not_started` entries for the fixed steps and the current step.
fn ensure_progress(plan: &mut Plan, step_id: &str) {
    for id in StepRegistry::fixed_ids() {
        plan.progress.ensure(id);
    }
    plan.progress.ensure(step_id);
}
