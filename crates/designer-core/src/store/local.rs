//! SQLite-backed plan store.

use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use tokio::task;

use super::PlanStore;
use crate::{
    db::Database,
    error::{DesignerError, Result},
    models::{FieldUpdate, Plan},
    session::SessionContext,
};

/// Plan store over a local SQLite file.
///
/// Each operation opens its own connection on a blocking worker thread.
#[derive(Debug, Clone)]
pub struct LocalPlanStore {
    db_path: PathBuf,
}

impl LocalPlanStore {
    /// Opens (and initializes if needed) the database at `db_path`.
    pub async fn open(db_path: PathBuf) -> Result<Self> {
        let path = db_path.clone();
        task::spawn_blocking(move || Database::new(&path).map(drop))
            .await
            .map_err(|e| DesignerError::join(&e))??;

        Ok(Self { db_path })
    }

    /// Path of the database file.
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }

    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(|e| DesignerError::join(&e))?
    }
}

#[async_trait]
impl PlanStore for LocalPlanStore {
    async fn load(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        let user = ctx.user()?.to_string();
        let id = plan_id.to_string();
        debug!("Loading plan {id} from {}", self.db_path.display());

        self.with_db(move |db| {
            let plan = db
                .get_plan(&id)?
                .ok_or_else(|| DesignerError::PlanNotFound { id: id.clone() })?;
            if !plan.can_read(&user) {
                return Err(DesignerError::NotAuthorized { id });
            }
            Ok(plan)
        })
        .await
    }

    async fn update_fields(
        &self,
        ctx: &SessionContext,
        plan_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        let user = ctx.user()?.to_string();
        let id = plan_id.to_string();
        let updates = updates.to_vec();
        debug!("Updating {} field(s) of plan {id}", updates.len());

        self.with_db(move |db| db.update_plan_fields(&id, &user, &updates).map(drop))
            .await
    }

    async fn create(&self, ctx: &SessionContext, name: &str) -> Result<Plan> {
        let user = ctx.user()?.to_string();
        let name = name.to_string();
        self.with_db(move |db| db.create_plan(&user, &name)).await
    }

    async fn list(&self, ctx: &SessionContext) -> Result<Vec<Plan>> {
        let user = ctx.user()?.to_string();
        self.with_db(move |db| db.list_plans(&user)).await
    }

    async fn delete(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        let user = ctx.user()?.to_string();
        let id = plan_id.to_string();
        self.with_db(move |db| db.delete_plan(&id, &user)).await
    }
}
