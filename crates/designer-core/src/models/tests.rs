//! Tests for the models module.

use serde_json::json;

use super::*;

#[test]
fn test_progress_state_serde_snake_case() {
    let value = serde_json::to_value(ProgressState::NotStarted).unwrap();
    assert_eq!(value, json!("not_started"));

    let state: ProgressState = serde_json::from_value(json!("uncompleted")).unwrap();
    assert_eq!(state, ProgressState::Uncompleted);
}

#[test]
fn test_progress_state_from_str() {
    assert_eq!(
        "completed".parse::<ProgressState>().unwrap(),
        ProgressState::Completed
    );
    assert_eq!(
        "NOT_STARTED".parse::<ProgressState>().unwrap(),
        ProgressState::NotStarted
    );
    assert!("done".parse::<ProgressState>().is_err());
}

#[test]
fn test_progress_ensure_does_not_downgrade() {
    let mut progress = Progress::default();
    progress.mark_completed("name");
    progress.ensure("name");
    progress.ensure("partners");

    assert_eq!(progress.get("name"), ProgressState::Completed);
    assert_eq!(progress.get("partners"), ProgressState::NotStarted);
    assert!(progress.contains("partners"));
    assert!(!progress.contains("topics"));
    assert_eq!(progress.get("topics"), ProgressState::NotStarted);
}

#[test]
fn test_plan_deserializes_with_missing_fields() {
    let plan: Plan = serde_json::from_value(json!({
        "_id": "p1",
        "name": "Partial",
        "progress": { "name": "completed" }
    }))
    .unwrap();

    assert_eq!(plan.id, "p1");
    assert_eq!(plan.name, "Partial");
    assert!(plan.partners.is_empty());
    assert!(plan.realization.is_none());
    assert_eq!(plan.progress.get("name"), ProgressState::Completed);
}

#[test]
fn test_plan_new_grants_author_access() {
    let plan = Plan::new("p1", "alice", "My VE");
    assert!(plan.can_read("alice"));
    assert!(plan.can_write("alice"));
    assert!(!plan.can_read("bob"));
}

#[test]
fn test_read_access_does_not_grant_write() {
    let mut plan = Plan::new("p1", "alice", "My VE");
    plan.read_access.push("bob".to_string());
    assert!(plan.can_read("bob"));
    assert!(!plan.can_write("bob"));
}

#[test]
fn test_with_updates_applies_all_fields() {
    let plan = Plan::new("p1", "alice", "Old");
    let updated = plan
        .with_updates(&[
            FieldUpdate::new("name", json!("New")),
            FieldUpdate::new("topics", json!(["climate", "migration"])),
        ])
        .unwrap();

    assert_eq!(updated.name, "New");
    assert_eq!(updated.topics, vec!["climate", "migration"]);
    assert_eq!(plan.name, "Old");
}

#[test]
fn test_with_updates_is_all_or_nothing() {
    let plan = Plan::new("p1", "alice", "Old");
    let err = plan
        .with_updates(&[
            FieldUpdate::new("name", json!("New")),
            FieldUpdate::new("partners", json!(42)),
        ])
        .unwrap_err();

    match err {
        crate::DesignerError::InvalidInput { field, .. } => assert_eq!(field, "partners"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_with_updates_rejects_unknown_and_protected_fields() {
    let plan = Plan::new("p1", "alice", "Old");
    assert!(plan
        .with_updates(&[FieldUpdate::new("colour", json!("red"))])
        .is_err());
    assert!(plan
        .with_updates(&[FieldUpdate::new("author", json!("mallory"))])
        .is_err());
}

#[test]
fn test_user_step_index_matches_normalized_name() {
    let mut plan = Plan::new("p1", "alice", "My VE");
    plan.steps.push(PlanStep {
        name: "Kickoff".to_string(),
        ..Default::default()
    });

    assert_eq!(plan.user_step_index("kickoff"), Some(0));
    assert_eq!(plan.user_step_index("Kickoff"), None);
}

#[test]
fn test_summary_counts_fixed_and_user_steps() {
    let mut plan = Plan::new("p1", "alice", "My VE");
    plan.steps.push(PlanStep {
        name: "Kickoff".to_string(),
        ..Default::default()
    });
    plan.progress.mark_completed("name");
    plan.progress.mark_completed("kickoff");

    let summary = PlanSummary::from(&plan);
    assert_eq!(
        summary.total_steps as usize,
        crate::registry::FIXED_STEPS.len() + 1
    );
    assert_eq!(summary.completed_steps, 2);
}
