mod common;

use std::sync::Arc;

use common::RecordingStore;
use designer_core::{
    models::{Plan, PlanStep, ProgressState},
    wizard::{Destination, Notice, WizardController, WizardState},
    DesignerError, PlanStore, SessionContext,
};
use serde_json::json;

fn plan() -> Plan {
    let mut plan = Plan::new("p1", "alice", "My VE");
    plan.progress.mark_completed("name");
    plan
}

async fn mounted(store: &Arc<RecordingStore>, step_id: &str) -> WizardController {
    let store: Arc<dyn PlanStore> = store.clone();
    let mut controller = WizardController::new(store, SessionContext::new("alice"), "p1", step_id);
    controller.mount().await.expect("Failed to mount controller");
    controller
}

#[tokio::test]
async fn test_valid_submit_completes_only_that_step() {
    let store = RecordingStore::with_plans([plan()]);
    let mut controller = mounted(&store, "topics").await;

    controller
        .set_field("topics", json!(["climate", "migration"]))
        .unwrap();
    controller.submit(Destination::Next).await.unwrap();

    assert!(matches!(
        controller.state(),
        WizardState::Navigating { persisted: true, .. }
    ));
    assert_eq!(controller.navigation().unwrap().href(), "/languages?plannerId=p1");

    let stored = store.plan("p1");
    assert_eq!(stored.topics, vec!["climate", "migration"]);
    assert_eq!(stored.progress.get("topics"), ProgressState::Completed);
    assert_eq!(stored.progress.get("name"), ProgressState::Completed);
    for id in ["partners", "institutions", "languages", "finish"] {
        assert_eq!(stored.progress.get(id), ProgressState::NotStarted, "{id}");
    }

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    let fields: Vec<&str> = updates[0].1.iter().map(|u| u.field_name.as_str()).collect();
    assert_eq!(fields, vec!["topics", "progress"]);
}

#[tokio::test]
async fn test_optional_empty_step_is_not_persisted() {
    let mut original = plan();
    original.learning_goals = vec![];
    let store = RecordingStore::with_plans([original.clone()]);
    let mut controller = mounted(&store, "learning_goals").await;

    controller.submit(Destination::Next).await.unwrap();

    assert!(matches!(
        controller.state(),
        WizardState::Navigating { persisted: false, .. }
    ));
    assert!(store.updates().is_empty());
    assert_eq!(store.plan("p1"), original);
}

#[tokio::test]
async fn test_submit_without_edits_keeps_values() {
    let mut original = plan();
    original.partners = vec!["bob".to_string()];
    let store = RecordingStore::with_plans([original.clone()]);
    let mut controller = mounted(&store, "partners").await;

    controller.submit(Destination::Next).await.unwrap();

    let stored = store.plan("p1");
    assert_eq!(stored.partners, original.partners);
    assert_eq!(stored.name, original.name);
    assert_eq!(stored.progress.get("partners"), ProgressState::Completed);

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert!(updates[0].1.iter().all(|u| u.field_name == "progress"));
}

#[tokio::test]
async fn test_invalid_submit_needs_confirmation() {
    let store = RecordingStore::with_plans([plan()]);
    let mut controller = mounted(&store, "name").await;

    controller.set_field("name", json!("")).unwrap();
    controller.submit(Destination::Next).await.unwrap();

    let WizardState::ShowingLeaveConfirmation { errors, .. } = controller.state() else {
        panic!("expected leave confirmation, got {:?}", controller.state());
    };
    assert_eq!(errors[0].field, "name");
    assert!(controller.navigation().is_none());
    assert!(store.updates().is_empty());

    controller.cancel().unwrap();
    assert_eq!(controller.state(), &WizardState::Ready);
    assert_eq!(controller.form().get("name"), &json!(""));

    controller.submit(Destination::Next).await.unwrap();
    controller.confirm_leave().unwrap();
    assert!(matches!(
        controller.state(),
        WizardState::Navigating { persisted: false, .. }
    ));
    assert!(store.updates().is_empty());
    assert_eq!(store.plan("p1").name, "My VE");
}

#[tokio::test]
async fn test_duplicate_user_steps_share_one_nav_entry() {
    let mut original = plan();
    original.steps = vec![
        PlanStep {
            name: "Kickoff".to_string(),
            ..Default::default()
        },
        PlanStep {
            name: "Kickoff".to_string(),
            ..Default::default()
        },
    ];
    let store = RecordingStore::with_plans([original]);
    let controller = mounted(&store, "kickoff").await;

    let nav = controller.nav();
    let kickoffs: Vec<_> = nav
        .entries()
        .iter()
        .filter(|entry| entry.step.id == "kickoff")
        .collect();
    assert_eq!(kickoffs.len(), 1);
    assert!(kickoffs[0].current);
    assert_eq!(kickoffs[0].step.route, "/step-data/Kickoff");
}

#[tokio::test]
async fn test_forbidden_update_raises_permission_notice() {
    let store = RecordingStore::with_plans([Plan::new("p1", "alice", "Old name")]);
    let mut controller = mounted(&store, "name").await;

    controller.set_field("name", json!("My VE")).unwrap();
    store.fail_next_update(DesignerError::NotAuthorized {
        id: "p1".to_string(),
    });
    controller.submit(Destination::Next).await.unwrap();

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, "p1");
    assert_eq!(updates[0].1[0].field_name, "name");
    assert_eq!(updates[0].1[0].value, json!("My VE"));

    assert_eq!(controller.state(), &WizardState::Ready);
    assert_eq!(controller.notices(), &[Notice::PermissionDenied]);
    assert_eq!(controller.form().get("name"), &json!("My VE"));
    assert_eq!(controller.plan().name, "Old name");
    assert!(controller.is_dirty());
    assert_eq!(store.plan("p1").name, "Old name");
}

#[tokio::test]
async fn test_failed_load_degrades_to_defaults() {
    let store = RecordingStore::with_plans([plan()]);
    store.fail_next_load(DesignerError::Server {
        message: "502 Bad Gateway".to_string(),
    });
    let controller = mounted(&store, "topics").await;

    assert_eq!(controller.state(), &WizardState::Ready);
    assert!(matches!(controller.notices(), [Notice::LoadFailed(_)]));
    assert!(controller.is_degraded());
    assert_eq!(controller.form().get("topics"), &json!([]));
    assert_eq!(controller.plan().progress.get("name"), ProgressState::NotStarted);
    assert!(controller.plan().progress.contains("finish"));
}

#[tokio::test]
async fn test_submit_after_failed_load_keeps_saved_progress() {
    let mut original = plan();
    original.partners = vec!["bob".to_string()];
    original.progress.mark_completed("partners");
    original.progress.mark_completed("institutions");
    let store = RecordingStore::with_plans([original]);
    store.fail_next_load(DesignerError::Server {
        message: "502 Bad Gateway".to_string(),
    });
    let mut controller = mounted(&store, "topics").await;

    controller.set_field("topics", json!(["climate"])).unwrap();
    controller.submit(Destination::Next).await.unwrap();

    assert!(matches!(
        controller.state(),
        WizardState::Navigating { persisted: true, .. }
    ));
    assert!(!controller.is_degraded());

    let stored = store.plan("p1");
    for id in ["name", "partners", "institutions", "topics"] {
        assert_eq!(stored.progress.get(id), ProgressState::Completed, "{id}");
    }
    assert_eq!(stored.partners, vec!["bob"]);
    assert_eq!(stored.topics, vec!["climate"]);

    let updates = store.updates();
    assert_eq!(updates.len(), 1);
    let fields: Vec<&str> = updates[0].1.iter().map(|u| u.field_name.as_str()).collect();
    assert_eq!(fields, vec!["topics", "progress"]);
}

#[tokio::test]
async fn test_submit_after_failed_load_needs_a_fresh_plan() {
    let store = RecordingStore::with_plans([plan()]);
    store.fail_next_load(DesignerError::Server {
        message: "502 Bad Gateway".to_string(),
    });
    let mut controller = mounted(&store, "topics").await;
    controller.take_notices();

    controller.set_field("topics", json!(["climate"])).unwrap();
    store.fail_next_load(DesignerError::Server {
        message: "503 Service Unavailable".to_string(),
    });
    controller.submit(Destination::Next).await.unwrap();

    assert_eq!(controller.state(), &WizardState::Ready);
    assert!(matches!(controller.notices(), [Notice::ServerError(_)]));
    assert!(store.updates().is_empty());
    assert_eq!(store.plan("p1").progress.get("name"), ProgressState::Completed);
    assert_eq!(controller.form().get("topics"), &json!(["climate"]));
}

#[tokio::test]
async fn test_user_step_name_is_read_only() {
    let mut original = plan();
    original.steps = ["Kickoff", "Wrap-up"]
        .iter()
        .map(|name| PlanStep {
            name: (*name).to_string(),
            ..Default::default()
        })
        .collect();
    let store = RecordingStore::with_plans([original]);
    let mut controller = mounted(&store, "kickoff").await;

    let err = controller.set_field("name", json!("Wrap-up")).unwrap_err();
    assert!(matches!(err, DesignerError::InvalidInput { ref field, .. } if field == "name"));

    controller.set_field("workload", json!(5)).unwrap();
    controller.submit(Destination::Next).await.unwrap();

    let stored = store.plan("p1");
    let names: Vec<&str> = stored.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Kickoff", "Wrap-up"]);
    assert_eq!(stored.steps[0].workload, 5);
    assert_eq!(stored.progress.get("kickoff"), ProgressState::Completed);
}

#[tokio::test]
async fn test_navigation_stays_at_the_ends() {
    let store = RecordingStore::with_plans([plan()]);

    let first = mounted(&store, "name").await;
    assert_eq!(first.resolve(&Destination::Back).unwrap().route, "/name");
    assert_eq!(first.resolve(&Destination::Next).unwrap().route, "/partners");

    let last = mounted(&store, "finish").await;
    assert_eq!(last.resolve(&Destination::Next).unwrap().route, "/finish");
    assert_eq!(
        last.resolve(&Destination::Step("target_groups".to_string()))
            .unwrap()
            .route,
        "/target-groups"
    );
    assert!(last.resolve(&Destination::Step("nowhere".to_string())).is_err());
}

#[tokio::test]
async fn test_side_nav_click_submits() {
    let store = RecordingStore::with_plans([plan()]);
    let mut controller = mounted(&store, "languages").await;

    controller.set_field("languages", json!(["de", "en"])).unwrap();
    controller.select_nav_entry("realization").await.unwrap();

    assert_eq!(
        controller.navigation().unwrap().href(),
        "/realization?plannerId=p1"
    );
    assert_eq!(store.plan("p1").languages, vec!["de", "en"]);
}

#[tokio::test]
async fn test_edits_only_while_ready() {
    let store = RecordingStore::with_plans([plan()]);
    let store_dyn: Arc<dyn PlanStore> = store.clone();
    let mut controller = WizardController::new(store_dyn, SessionContext::new("alice"), "p1", "name");

    let err = controller.set_field("name", json!("x")).unwrap_err();
    assert!(matches!(err, DesignerError::InvalidTransition { .. }));
    let err = controller.submit(Destination::Next).await.unwrap_err();
    assert!(matches!(err, DesignerError::InvalidTransition { .. }));

    controller.mount().await.unwrap();
    let err = controller.set_field("partners", json!([])).unwrap_err();
    assert!(matches!(err, DesignerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_user_step_submit_writes_steps_list() {
    let mut original = plan();
    original.steps = vec![PlanStep {
        name: "Kickoff".to_string(),
        workload: 2,
        ..Default::default()
    }];
    let store = RecordingStore::with_plans([original]);
    let mut controller = mounted(&store, "kickoff").await;

    controller.set_field("workload", json!(6)).unwrap();
    controller.submit(Destination::Back).await.unwrap();

    assert_eq!(controller.navigation().unwrap().route, "/finish");
    let stored = store.plan("p1");
    assert_eq!(stored.steps[0].workload, 6);
    assert_eq!(stored.progress.get("kickoff"), ProgressState::Completed);
}
