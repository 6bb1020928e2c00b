use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;
use sqlx::{Pool, Postgres};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    database: String,
}

impl HealthResponse {
    fn new(status: &str, database: &str) -> Self {
        Self {
            status: status.to_string(),
            database: database.to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service and store reachable", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    match ping(&state.db_pool).await {
        Ok(()) => {
            debug!("health check passed");
            (
                StatusCode::OK,
                Json(HealthResponse::new("OK", "healthy")),
            )
        }
        Err(e) => {
            error!(error = %e, "database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new("DEGRADED", "unreachable")),
            )
        }
    }
}

async fn ping(pool: &Pool<Postgres>) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
