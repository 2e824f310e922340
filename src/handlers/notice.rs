// handlers/notice.rs - GET /api/notice handler

use axum::{extract::State, response::Json};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::error;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum NoticeError {
    #[error("failed to read notice file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse notice file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Serves the notice YAML file as JSON. It is re-read on every request.
pub async fn notice_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let path = &state.config.notice.path;
    load_notice(Path::new(path)).await.map(Json).map_err(|e| {
        error!(error = %e, path = %path, "Failed to load notice");
        ApiError::internal_server_error("Failed to load notice")
    })
}

pub async fn load_notice(path: &Path) -> Result<Value, NoticeError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_yaml::from_str::<Value>(&raw)?)
}
