//! Read-through cache in front of another plan store.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;

use super::PlanStore;
use crate::{
    error::Result,
    models::{FieldUpdate, Plan},
    session::SessionContext,
};

/// Cache entries are scoped per caller so one user's cached copy is never
/// served to another.
type CacheKey = (Option<String>, String);

/// Keeps loaded plans until they are updated or deleted through this store.
pub struct CachedPlanStore<S> {
    inner: S,
    plans: RwLock<HashMap<CacheKey, Plan>>,
}

impl<S: PlanStore> CachedPlanStore<S> {
    /// Wrap `inner` with an empty cache.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            plans: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Whether a copy of the plan is cached for this caller.
    pub async fn is_cached(&self, ctx: &SessionContext, plan_id: &str) -> bool {
        self.plans.read().await.contains_key(&key(ctx, plan_id))
    }

    /// Drops every cached copy of a plan.
    pub async fn invalidate(&self, plan_id: &str) {
        self.plans.write().await.retain(|(_, id), _| id != plan_id);
    }
}

fn key(ctx: &SessionContext, plan_id: &str) -> CacheKey {
    (ctx.user_id().map(String::from), plan_id.to_string())
}

#[async_trait]
impl<S: PlanStore> PlanStore for CachedPlanStore<S> {
    async fn load(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        if let Some(plan) = self.plans.read().await.get(&key(ctx, plan_id)) {
            debug!("Plan {plan_id} served from cache");
            return Ok(plan.clone());
        }

        let plan = self.inner.load(ctx, plan_id).await?;
        self.plans
            .write()
            .await
            .insert(key(ctx, plan_id), plan.clone());
        Ok(plan)
    }

    async fn update_fields(
        &self,
        ctx: &SessionContext,
        plan_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        self.inner.update_fields(ctx, plan_id, updates).await?;
        self.invalidate(plan_id).await;
        Ok(())
    }

    async fn create(&self, ctx: &SessionContext, name: &str) -> Result<Plan> {
        self.inner.create(ctx, name).await
    }

    async fn list(&self, ctx: &SessionContext) -> Result<Vec<Plan>> {
        self.inner.list(ctx).await
    }

    async fn delete(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        let plan = self.inner.delete(ctx, plan_id).await?;
        self.invalidate(plan_id).await;
        Ok(plan)
    }
}
