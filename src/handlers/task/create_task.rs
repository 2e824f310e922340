// handlers/task/create_task.rs - POST /api/task/create_task handler

use axum::{extract::State, response::Json};
use tracing::debug;

use crate::database::models::{to_record, Task};
use crate::database::Table;
use crate::error::{ApiError, Exposure};
use crate::handlers::Success;
use crate::middleware::validate_body::ValidatedJson;
use crate::state::AppState;

const FAILED: &str = "Failed to create task";

/// Records a task as submitted. Status transitions happen elsewhere.
pub async fn create_task(
    State(state): State<AppState>,
    ValidatedJson(task): ValidatedJson<Task>,
) -> Result<Json<Success>, ApiError> {
    let record = to_record(&task).map_err(|e| ApiError::database(FAILED, e, Exposure::Detailed))?;

    state
        .gateway
        .insert(Table::Tasks, record)
        .await
        .map_err(|e| ApiError::database(FAILED, e, Exposure::Detailed))?;

    debug!(task_id = %task.task_id, status = %task.status, "Created task");
    Ok(Success::ok())
}
