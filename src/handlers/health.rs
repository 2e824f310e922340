// handlers/health.rs - GET /api/health and GET /api/health/ready handlers

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Liveness only; does not touch the database.
pub async fn health_get() -> Json<Value> {
    Json(json!({ "message": "Service is alive" }))
}

/// Readiness: round-trips to the gateway.
pub async fn ready_get(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    match state.gateway.ping().await {
        Ok(()) => Ok(Json(json!({
            "message": "Service is ready",
            "database": "ok",
            "backend": state.gateway.backend(),
        }))),
        Err(e) => {
            warn!(error = %e, backend = state.gateway.backend(), "Readiness probe failed");
            Err(ApiError::service_unavailable("Database unavailable"))
        }
    }
}
