#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use designer_core::{
    models::{FieldUpdate, Plan},
    DesignerBuilder, DesignerError, PlanStore, Result, SessionContext,
};
use tempfile::TempDir;

/// Helper function to create a test designer
pub async fn create_test_designer() -> (TempDir, designer_core::Designer) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let designer = DesignerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create designer");
    (temp_dir, designer)
}

/// In-memory plan store that records every `update_fields` call and can be
/// scripted to fail the next load or update.
#[derive(Default)]
pub struct RecordingStore {
    plans: Mutex<HashMap<String, Plan>>,
    updates: Mutex<Vec<(String, Vec<FieldUpdate>)>>,
    fail_next_load: Mutex<Option<DesignerError>>,
    fail_next_update: Mutex<Option<DesignerError>>,
}

impl RecordingStore {
    /// Store holding the given plans.
    pub fn with_plans(plans: impl IntoIterator<Item = Plan>) -> Arc<Self> {
        let store = Self::default();
        {
            let mut map = store.plans.lock().unwrap();
            for plan in plans {
                map.insert(plan.id.clone(), plan);
            }
        }
        Arc::new(store)
    }

    /// The next `load` fails with `error`.
    pub fn fail_next_load(&self, error: DesignerError) {
        *self.fail_next_load.lock().unwrap() = Some(error);
    }

    /// The next `update_fields` fails with `error`.
    pub fn fail_next_update(&self, error: DesignerError) {
        *self.fail_next_update.lock().unwrap() = Some(error);
    }

    /// Every `update_fields` call that reached the store, including failed ones.
    pub fn updates(&self) -> Vec<(String, Vec<FieldUpdate>)> {
        self.updates.lock().unwrap().clone()
    }

    /// Current stored state of a plan.
    pub fn plan(&self, id: &str) -> Plan {
        self.plans.lock().unwrap()[id].clone()
    }
}

#[async_trait]
impl PlanStore for RecordingStore {
    async fn load(&self, _ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        if let Some(error) = self.fail_next_load.lock().unwrap().take() {
            return Err(error);
        }
        self.plans
            .lock()
            .unwrap()
            .get(plan_id)
            .cloned()
            .ok_or_else(|| DesignerError::PlanNotFound {
                id: plan_id.to_string(),
            })
    }

    async fn update_fields(
        &self,
        _ctx: &SessionContext,
        plan_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        self.updates
            .lock()
            .unwrap()
            .push((plan_id.to_string(), updates.to_vec()));
        if let Some(error) = self.fail_next_update.lock().unwrap().take() {
            return Err(error);
        }

        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .get(plan_id)
            .ok_or_else(|| DesignerError::PlanNotFound {
                id: plan_id.to_string(),
            })?;
        let updated = plan.with_updates(updates)?;
        plans.insert(plan_id.to_string(), updated);
        Ok(())
    }

    async fn create(&self, ctx: &SessionContext, name: &str) -> Result<Plan> {
        let mut plans = self.plans.lock().unwrap();
        let plan = Plan::new(format!("p{}", plans.len() + 1), ctx.user()?, name);
        plans.insert(plan.id.clone(), plan.clone());
        Ok(plan)
    }

    async fn list(&self, _ctx: &SessionContext) -> Result<Vec<Plan>> {
        Ok(self.plans.lock().unwrap().values().cloned().collect())
    }

    async fn delete(&self, _ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        self.plans
            .lock()
            .unwrap()
            .remove(plan_id)
            .ok_or_else(|| DesignerError::PlanNotFound {
                id: plan_id.to_string(),
            })
    }
}
