//! Plan store backed by the VE-Collab backend.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PlanStore;
use crate::{
    error::{DesignerError, Result},
    models::{FieldUpdate, Plan},
    session::SessionContext,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct PlanResponse {
    plan: Plan,
}

#[derive(Debug, Deserialize)]
struct PlansResponse {
    #[serde(default)]
    plans: Vec<Plan>,
}

#[derive(Debug, Deserialize)]
struct InsertResponse {
    inserted_id: String,
}

#[derive(Debug, Serialize)]
struct UpdateFieldBody<'a> {
    plan_id: &'a str,
    field_name: &'a str,
    value: &'a Value,
}

#[derive(Debug, Serialize)]
struct UpdateFieldsBody<'a> {
    update: Vec<UpdateFieldBody<'a>>,
}

/// HTTP client for the backend's `/planner` endpoints.
#[derive(Debug, Clone)]
pub struct HttpPlanStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPlanStore {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("ve-designer/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, ctx: &SessionContext, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{path}", self.base_url))
            .header(reqwest::header::ACCEPT_LANGUAGE, ctx.locale());
        if let Some(token) = ctx.access_token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Maps non-2xx responses onto the error taxonomy.
    async fn check(response: Response, plan_id: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::UNAUTHORIZED => Err(DesignerError::NotAuthenticated),
            StatusCode::FORBIDDEN => Err(DesignerError::NotAuthorized {
                id: plan_id.to_string(),
            }),
            StatusCode::NOT_FOUND => Err(DesignerError::PlanNotFound {
                id: plan_id.to_string(),
            }),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(DesignerError::Server {
                    message: format!("{status}: {body}"),
                })
            }
        }
    }
}

#[async_trait]
impl PlanStore for HttpPlanStore {
    async fn load(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        debug!("GET /planner/get?_id={plan_id}");
        let response = self
            .request(ctx, Method::GET, "/planner/get")
            .query(&[("_id", plan_id)])
            .send()
            .await?;

        let body: PlanResponse = Self::check(response, plan_id).await?.json().await?;
        Ok(body.plan)
    }

    async fn update_fields(
        &self,
        ctx: &SessionContext,
        plan_id: &str,
        updates: &[FieldUpdate],
    ) -> Result<()> {
        let mut bodies: Vec<UpdateFieldBody<'_>> = updates
            .iter()
            .map(|u| UpdateFieldBody {
                plan_id,
                field_name: &u.field_name,
                value: &u.value,
            })
            .collect();

        let request = match bodies.len() {
            0 => return Ok(()),
            1 => {
                debug!("POST /planner/update_field for plan {plan_id}");
                let body = bodies.remove(0);
                self.request(ctx, Method::POST, "/planner/update_field")
                    .json(&body)
            }
            n => {
                debug!("POST /planner/update_fields with {n} updates for plan {plan_id}");
                self.request(ctx, Method::POST, "/planner/update_fields")
                    .json(&UpdateFieldsBody { update: bodies })
            }
        };

        Self::check(request.send().await?, plan_id).await?;
        Ok(())
    }

    async fn create(&self, ctx: &SessionContext, name: &str) -> Result<Plan> {
        let response = self
            .request(ctx, Method::POST, "/planner/insert_empty")
            .send()
            .await?;
        let inserted: InsertResponse = Self::check(response, "").await?.json().await?;

        if !name.is_empty() {
            self.update_fields(
                ctx,
                &inserted.inserted_id,
                &[FieldUpdate::new("name", Value::from(name))],
            )
            .await?;
        }
        self.load(ctx, &inserted.inserted_id).await
    }

    async fn list(&self, ctx: &SessionContext) -> Result<Vec<Plan>> {
        let response = self
            .request(ctx, Method::GET, "/planner/get_available")
            .send()
            .await?;
        let body: PlansResponse = Self::check(response, "").await?.json().await?;
        Ok(body.plans)
    }

    async fn delete(&self, ctx: &SessionContext, plan_id: &str) -> Result<Plan> {
        let plan = self.load(ctx, plan_id).await?;
        let response = self
            .request(ctx, Method::DELETE, "/planner/delete")
            .query(&[("_id", plan_id)])
            .send()
            .await?;
        Self::check(response, plan_id).await?;
        Ok(plan)
    }
}
