// handlers/chat/insert_message.rs - POST /api/chat/insert_message handler

use axum::{extract::State, response::Json};
use tracing::debug;

use crate::database::models::{to_record, IncomingMessage, MessageRow};
use crate::database::Table;
use crate::error::{ApiError, Exposure};
use crate::handlers::Success;
use crate::middleware::validate_body::ValidatedJson;
use crate::state::AppState;

const FAILED: &str = "Failed to insert message";

/// Stores one chat message. The message id is the primary key, so a
/// re-sent message is answered with 409 instead of a duplicate row.
pub async fn insert_message(
    State(state): State<AppState>,
    ValidatedJson(message): ValidatedJson<IncomingMessage>,
) -> Result<Json<Success>, ApiError> {
    let row = MessageRow::from(message);
    let record = to_record(&row).map_err(|e| ApiError::database(FAILED, e, Exposure::Detailed))?;

    state
        .gateway
        .insert(Table::Messages, record)
        .await
        .map_err(|e| ApiError::database(FAILED, e, Exposure::Detailed))?;

    debug!(message_id = %row.id, room_id = %row.room_id, "Inserted message");
    Ok(Success::ok())
}
