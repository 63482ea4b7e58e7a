//! Command definitions and handlers.
//!
//! Every command has a clap argument struct that converts into the matching
//! core parameter type, so the core stays free of argument-parsing concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Designer
//! ```

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use designer_core::{
    display::{CreateResult, DeleteResult},
    models::FieldUpdate,
    params::{CreatePlan, DeletePlan, PlanId, ShowNav, ShowStep, SubmitStep},
    wizard::Destination,
    Designer, SessionContext,
};
use serde_json::Value;

use crate::renderer::TerminalRenderer;

/// Create a new plan
#[derive(Args)]
pub struct CreatePlanArgs {
    /// Project name of the plan
    pub name: String,
}

impl From<CreatePlanArgs> for CreatePlan {
    fn from(val: CreatePlanArgs) -> Self {
        CreatePlan { name: val.name }
    }
}

/// Show a plan with its progress
#[derive(Args)]
pub struct ShowPlanArgs {
    #[arg(help = "Identifier of the plan to show")]
    pub id: String,
}

impl From<ShowPlanArgs> for PlanId {
    fn from(val: ShowPlanArgs) -> Self {
        PlanId { id: val.id }
    }
}

/// Permanently delete a plan
///
/// Removes the plan and all of its steps. This cannot be undone; only the
/// plan's author may delete it.
#[derive(Args)]
pub struct DeletePlanArgs {
    #[arg(help = "Identifier of the plan to delete")]
    pub id: String,
    #[arg(long, help = "Confirm the permanent deletion")]
    pub confirm: bool,
}

impl From<DeletePlanArgs> for DeletePlan {
    fn from(val: DeletePlanArgs) -> Self {
        DeletePlan {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Create a new plan
    #[command(alias = "c")]
    Create(CreatePlanArgs),
    /// List the plans you can read
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a plan with its progress
    #[command(alias = "s")]
    Show(ShowPlanArgs),
    /// Delete a plan permanently
    #[command(alias = "d")]
    Delete(DeletePlanArgs),
}

/// Show the side progress navigation of a plan
#[derive(Args)]
pub struct NavArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
    #[arg(long, help = "Step to mark as current")]
    pub step: Option<String>,
}

impl From<NavArgs> for ShowNav {
    fn from(val: NavArgs) -> Self {
        ShowNav {
            plan_id: val.plan_id,
            step_id: val.step,
        }
    }
}

/// Show the seeded form of a step
#[derive(Args)]
pub struct ShowStepArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
    #[arg(help = "Step id, e.g. name, partners or a user-defined step name")]
    pub step_id: String,
}

impl From<ShowStepArgs> for ShowStep {
    fn from(val: ShowStepArgs) -> Self {
        ShowStep {
            plan_id: val.plan_id,
            step_id: val.step_id,
        }
    }
}

/// Edit and submit a step
///
/// Applies the `--set` and `--set-text` edits to the step's form, validates
/// it and saves the step together with its progress before navigating.
/// `--set` reads its value as JSON, so `--set name=42` stores a number; use
/// `--set-text name=42` (or `--set 'name="42"'`) for text. An invalid form is not
/// saved; the wizard asks to leave without saving unless `--discard` is
/// given.
#[derive(Args)]
pub struct SubmitStepArgs {
    #[arg(help = "Identifier of the plan")]
    pub plan_id: String,
    #[arg(help = "Step id, e.g. name, partners or a user-defined step name")]
    pub step_id: String,
    #[arg(
        long = "set",
        value_name = "FIELD=JSON",
        value_parser = parse_assignment,
        help = "Form edit; values that are not valid JSON are taken as text"
    )]
    pub set: Vec<FieldUpdate>,
    #[arg(
        long = "set-text",
        value_name = "FIELD=TEXT",
        value_parser = parse_text_assignment,
        help = "Form edit taken literally as text, applied after --set"
    )]
    pub set_text: Vec<FieldUpdate>,
    #[arg(
        long,
        default_value = "next",
        help = "Where to go after saving: next, back or a step id"
    )]
    pub to: Destination,
    #[arg(long, help = "Leave without saving if the form is invalid")]
    pub discard: bool,
}

impl From<SubmitStepArgs> for SubmitStep {
    fn from(val: SubmitStepArgs) -> Self {
        SubmitStep {
            plan_id: val.plan_id,
            step_id: val.step_id,
            set: val.set.into_iter().chain(val.set_text).collect(),
            to: val.to,
            discard: val.discard,
        }
    }
}

/// Parses `field=value`, reading the value as JSON when possible.
fn parse_assignment(raw: &str) -> std::result::Result<FieldUpdate, String> {
    let (field, value) = split_assignment(raw, "JSON")?;
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok(FieldUpdate::new(field, value))
}

/// Parses `field=value`, keeping the value as text.
fn parse_text_assignment(raw: &str) -> std::result::Result<FieldUpdate, String> {
    let (field, value) = split_assignment(raw, "TEXT")?;
    Ok(FieldUpdate::new(field, Value::String(value.to_string())))
}

fn split_assignment<'a>(raw: &'a str, kind: &str) -> std::result::Result<(&'a str, &'a str), String> {
    let (field, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD={kind}, got '{raw}'"))?;
    let field = field.trim();
    if field.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((field, value))
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Show the seeded form of a step
    #[command(alias = "s")]
    Show(ShowStepArgs),
    /// Edit and submit a step
    #[command(alias = "sub")]
    Submit(SubmitStepArgs),
}

/// Runs commands against a designer and renders the results.
pub struct Cli {
    designer: Designer,
    renderer: TerminalRenderer,
    ctx: SessionContext,
}

impl Cli {
    pub fn new(designer: Designer, renderer: TerminalRenderer, ctx: SessionContext) -> Self {
        Self {
            designer,
            renderer,
            ctx,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Create(args) => self.create_plan(args.into()).await,
            PlanCommands::List => self.list_plans().await,
            PlanCommands::Show(args) => self.show_plan(args.into()).await,
            PlanCommands::Delete(args) => self.delete_plan(args.into()).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        match command {
            StepCommands::Show(args) => self.show_step(args.into()).await,
            StepCommands::Submit(args) => self.submit_step(args.into()).await,
        }
    }

    async fn create_plan(&self, params: CreatePlan) -> Result<()> {
        let plan = self
            .designer
            .create_plan(&self.ctx, &params)
            .await
            .context("Failed to create plan")?;
        self.renderer.render(&CreateResult::new(plan).to_string())
    }

    pub async fn list_plans(&self) -> Result<()> {
        let summaries = self
            .designer
            .list_plans(&self.ctx)
            .await
            .context("Failed to list plans")?;
        self.renderer.render(&format!("# Plans\n\n{summaries}"))
    }

    async fn show_plan(&self, params: PlanId) -> Result<()> {
        let plan = self
            .designer
            .show_plan(&self.ctx, &params)
            .await
            .with_context(|| format!("Failed to load plan {}", params.id))?;
        self.renderer.render(&plan.to_string())
    }

    async fn delete_plan(&self, params: DeletePlan) -> Result<()> {
        let plan = self
            .designer
            .delete_plan(&self.ctx, &params)
            .await
            .with_context(|| format!("Failed to delete plan {}", params.id))?;
        self.renderer.render(&DeleteResult::new(plan).to_string())
    }

    pub async fn show_nav(&self, args: NavArgs) -> Result<()> {
        let params = ShowNav::from(args);
        let nav = self
            .designer
            .side_nav(&self.ctx, &params)
            .await
            .with_context(|| format!("Failed to load navigation of plan {}", params.plan_id))?;
        self.renderer.render(&nav.to_string())
    }

    async fn show_step(&self, params: ShowStep) -> Result<()> {
        let controller = self
            .designer
            .open_step(&self.ctx, &params)
            .await
            .with_context(|| format!("Failed to open step {}", params.step_id))?;

        let mut output = String::new();
        if let Some(step) = controller.step() {
            output.push_str(&format!("# {}\n\n", step.label));
            output.push_str(&format!(
                "Route: `{}?plannerId={}`\n\n",
                step.route, params.plan_id
            ));
        }
        for notice in controller.notices() {
            output.push_str(&format!("> {notice}\n\n"));
        }
        output.push_str(&controller.form().to_string());
        self.renderer.render(&output)
    }

    async fn submit_step(&self, params: SubmitStep) -> Result<()> {
        let result = self
            .designer
            .submit_step(&self.ctx, &params)
            .await
            .with_context(|| format!("Failed to submit step {}", params.step_id))?;
        self.renderer.render(&result.to_string())
    }
}
