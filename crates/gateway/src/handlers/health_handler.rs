//! Health check handlers.

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppResult, OptionExt, RouteContext, RouteParams};
use credential_service_lib::PoolStatus;

use crate::handlers::route_handler::{dispatch, RouteHandler};
use crate::state::AppState;

/// Overall health response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    pub credentials: WorkerPoolHealth,
}

/// Credential worker pool occupancy.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkerPoolHealth {
    pub capacity: usize,
    pub available: usize,
}

impl From<PoolStatus> for WorkerPoolHealth {
    fn from(status: PoolStatus) -> Self {
        Self {
            capacity: status.capacity,
            available: status.available,
        }
    }
}

/// Health of a single component.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealthResponse {
    #[schema(example = "credentials")]
    pub component: String,
    #[schema(example = "healthy")]
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<WorkerPoolHealth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uptime_seconds: Option<u64>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/:component", get(component_health))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Gateway is serving", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        credentials: state.credentials.pool_status().into(),
    })
}

/// Health of one named component.
#[utoipa::path(
    get,
    path = "/health/{component}",
    tag = "Health",
    params(
        ("component" = String, Path, description = "`credentials` or `gateway`")
    ),
    responses(
        (status = 200, description = "Component status", body = ComponentHealthResponse),
        (status = 404, description = "Unknown component")
    )
)]
pub async fn component_health(
    State(state): State<AppState>,
    context: RouteContext,
) -> AppResult<Response> {
    dispatch(&ComponentHealth, state, context).await
}

/// Route handler reporting on a component named by the `component` capture.
pub struct ComponentHealth;

#[async_trait]
impl RouteHandler for ComponentHealth {
    async fn handle(&self, state: AppState, params: RouteParams) -> AppResult<Response> {
        let component = params.require("component")?;

        let report = match component {
            "credentials" => {
                let pool = state.credentials.pool_status();
                Some(ComponentHealthResponse {
                    component: component.to_string(),
                    status: pool_status_label(&pool).to_string(),
                    credentials: Some(pool.into()),
                    uptime_seconds: None,
                })
            }
            "gateway" => Some(ComponentHealthResponse {
                component: component.to_string(),
                status: "healthy".to_string(),
                credentials: None,
                uptime_seconds: Some(state.started_at.elapsed().as_secs()),
            }),
            _ => None,
        }
        .ok_or_not_found()?;

        Ok((StatusCode::OK, Json(report)).into_response())
    }
}

fn pool_status_label(pool: &PoolStatus) -> &'static str {
    if pool.available == 0 {
        "saturated"
    } else {
        "healthy"
    }
}
