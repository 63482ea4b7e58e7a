//! Per-step form schemas: which plan slice a step edits, whether it may be
//! skipped, and the rules its form must satisfy.

use serde_json::{Map, Value};

use super::{FieldRule, FormModel, Rule, ValidationError};
use crate::{
    error::{DesignerError, Result},
    models::{FieldUpdate, Plan, PlanStep, StepDefinition, StepKind},
};

/// Accepted values of `Plan.realization`.
pub const REALIZATION_FORMATS: &[&str] = &["physical", "virtual", "hybrid"];

/// The part of a plan a step reads and writes.
#[derive(Debug, Clone, PartialEq)]
pub enum StepSlice {
    /// Top-level plan fields, written back one update per changed field
    PlanFields(&'static [&'static str]),
    /// One entry of `Plan.steps`, written back as the whole `steps` list
    UserStep { id: String, name: String },
}

/// Form description of one wizard step.
#[derive(Debug, Clone)]
pub struct StepSchema {
    pub step_id: String,
    /// Optional steps may be passed through with an all-empty form
    pub optional: bool,
    pub slice: StepSlice,
    pub rules: Vec<FieldRule>,
}

const NAME_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("name", Rule::Length { min: 1, max: 200 }),
];

const PARTNER_RULES: &[FieldRule] = &[
    FieldRule::new("partners", Rule::MaxItems(50)),
    FieldRule::new("partners.*", Rule::Length { min: 1, max: 100 }),
];

const INSTITUTION_RULES: &[FieldRule] = &[
    FieldRule::new("institutions", Rule::MaxItems(20)),
    FieldRule::new("institutions.*.name", Rule::Required),
    FieldRule::new("institutions.*.name", Rule::Length { min: 1, max: 200 }),
    FieldRule::new("institutions.*.country", Rule::Length { min: 0, max: 100 }),
];

const TARGET_GROUP_RULES: &[FieldRule] = &[
    FieldRule::new("target_groups.*.name", Rule::Required),
    FieldRule::new("target_groups.*.age_min", Rule::Range { min: 0, max: 150 }),
    FieldRule::new("target_groups.*.age_max", Rule::Range { min: 0, max: 150 }),
];

const LEARNING_GOAL_RULES: &[FieldRule] =
    &[FieldRule::new("learning_goals.*", Rule::Length { min: 1, max: 500 })];

const TOPIC_RULES: &[FieldRule] = &[FieldRule::new("topics.*", Rule::Length { min: 1, max: 200 })];

const LANGUAGE_RULES: &[FieldRule] =
    &[FieldRule::new("languages.*", Rule::Length { min: 1, max: 100 })];

const REALIZATION_RULES: &[FieldRule] =
    &[FieldRule::new("realization", Rule::OneOf(REALIZATION_FORMATS))];

const LEARNING_ENV_RULES: &[FieldRule] =
    &[FieldRule::new("learning_env", Rule::Length { min: 0, max: 2000 })];

const STEP_NAME_RULES: &[FieldRule] = &[
    FieldRule::new("steps.*.name", Rule::Required),
    FieldRule::new("steps.*.name", Rule::Length { min: 1, max: 100 }),
    FieldRule::new("steps.*.workload", Rule::Range { min: 0, max: 999 }),
];

const USER_STEP_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required),
    FieldRule::new("name", Rule::Length { min: 1, max: 100 }),
    FieldRule::new("workload", Rule::Range { min: 0, max: 999 }),
    FieldRule::new("learning_goal", Rule::Length { min: 0, max: 1000 }),
    FieldRule::new("learning_activity", Rule::Length { min: 0, max: 1000 }),
    FieldRule::new("tasks.*.title", Rule::Required),
    FieldRule::new("tasks.*.title", Rule::Length { min: 1, max: 200 }),
];

impl StepSchema {
    /// Schema of a registered step.
    pub fn for_step(step: &StepDefinition) -> Self {
        if step.kind == StepKind::UserDefined {
            return Self {
                step_id: step.id.clone(),
                optional: false,
                slice: StepSlice::UserStep {
                    id: step.id.clone(),
                    name: step.label.clone(),
                },
                rules: USER_STEP_RULES.to_vec(),
            };
        }

        let (fields, optional, rules): (&'static [&'static str], bool, &[FieldRule]) =
            match step.id.as_str() {
                "name" => (&["name"], false, NAME_RULES),
                "partners" => (&["partners"], true, PARTNER_RULES),
                "institutions" => (&["institutions"], true, INSTITUTION_RULES),
                "target_groups" => (&["target_groups"], true, TARGET_GROUP_RULES),
                "learning_goals" => (&["learning_goals"], true, LEARNING_GOAL_RULES),
                "topics" => (&["topics"], true, TOPIC_RULES),
                "languages" => (&["languages"], true, LANGUAGE_RULES),
                "realization" => (&["realization"], true, REALIZATION_RULES),
                "learning_env" => (&["learning_env"], true, LEARNING_ENV_RULES),
                "step_names" => (&["steps"], false, STEP_NAME_RULES),
                _ => (&[], false, &[]),
            };

        Self {
            step_id: step.id.clone(),
            optional,
            slice: StepSlice::PlanFields(fields),
            rules: rules.to_vec(),
        }
    }

    /// Whether `field` is shown on the page but cannot be edited there.
    pub fn is_read_only(&self, field: &str) -> bool {
        matches!(self.slice, StepSlice::UserStep { .. }) && field == "name"
    }

    /// Copies the step's slice of `plan` into a form model.
    ///
    /// Missing or null slices yield default values.
    pub fn seed(&self, plan: &Plan) -> Result<FormModel> {
        match &self.slice {
            StepSlice::PlanFields(fields) => {
                let document = serde_json::to_value(plan)?;
                let values = fields
                    .iter()
                    .map(|field| {
                        let value = document.get(*field).cloned().unwrap_or(Value::Null);
                        ((*field).to_string(), value)
                    })
                    .collect();
                Ok(FormModel::from_map(values))
            }
            StepSlice::UserStep { id, name } => {
                let step = plan
                    .user_step_index(id)
                    .map(|i| plan.steps[i].clone())
                    .unwrap_or_else(|| PlanStep {
                        name: name.clone(),
                        ..Default::default()
                    });
                match serde_json::to_value(step)? {
                    Value::Object(values) => Ok(FormModel::from_map(values)),
                    _ => Ok(FormModel::from_map(Map::new())),
                }
            }
        }
    }

    /// Checks `form` against the declared rules and the plan's field types.
    pub fn validate(&self, plan: &Plan, form: &FormModel) -> Vec<ValidationError> {
        let root = form.to_value();
        let mut errors = Vec::new();
        for rule in &self.rules {
            rule.check(&root, &mut errors);
        }

        if errors.is_empty() {
            let typed = match &self.slice {
                StepSlice::PlanFields(_) => {
                    let updates: Vec<FieldUpdate> = form
                        .iter()
                        .map(|(field, value)| FieldUpdate::new(field, value.clone()))
                        .collect();
                    plan.with_updates(&updates).map(drop)
                }
                StepSlice::UserStep { .. } => serde_json::from_value::<PlanStep>(root)
                    .map(drop)
                    .map_err(|e| DesignerError::invalid_input("step").with_reason(e.to_string())),
            };
            if let Err(DesignerError::InvalidInput { field, reason }) = typed {
                errors.push(ValidationError {
                    field,
                    message: reason,
                });
            }
        }

        errors
    }

    /// Field updates that persist the edits made to `form` since `seed`.
    pub fn updates(&self, plan: &Plan, seed: &FormModel, form: &FormModel) -> Result<Vec<FieldUpdate>> {
        match &self.slice {
            StepSlice::PlanFields(_) => Ok(form
                .changed_fields(seed)
                .map(|(field, value)| FieldUpdate::new(field, value.clone()))
                .collect()),
            StepSlice::UserStep { id, name } => {
                if form.changed_fields(seed).next().is_none() {
                    return Ok(Vec::new());
                }
                let mut edited: PlanStep = serde_json::from_value(form.to_value())?;
                // The name is the step's identity; it only changes on `step_names`
                edited.name.clone_from(name);
                let mut steps = plan.steps.clone();
                match plan.user_step_index(id) {
                    Some(i) => steps[i] = edited,
                    None => steps.push(edited),
                }
                Ok(vec![FieldUpdate::new("steps", serde_json::to_value(steps)?)])
            }
        }
    }
}
