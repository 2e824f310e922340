// handlers/chat/create_room.rs - POST /api/chat/create_room handler

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::database::models::{from_record, to_record, ChatRoom, NewChatRoom};
use crate::database::Table;
use crate::error::{ApiError, Exposure};
use crate::middleware::validate_body::{FieldErrors, Validate, ValidatedJson};
use crate::state::AppState;

const FAILED: &str = "Failed to create chat room";

#[derive(Debug, Default, Deserialize)]
pub struct CreateRoomRequest {
    #[serde(default)]
    pub name: Option<Value>,
}

impl Validate for CreateRoomRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if matches!(self.name, Some(Value::Array(_)) | Some(Value::Object(_))) {
            errors.insert("name".to_string(), "Must be a string".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room_id: Value,
    pub name: String,
}

/// Creates a room with no unread messages and no active users.
///
/// The store generates the id; the cause of a failed insert is logged but
/// not returned.
pub async fn create_room(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    let room = NewChatRoom::named(request.name.as_ref());

    let record = to_record(&room).map_err(|e| ApiError::database(FAILED, e, Exposure::Hidden))?;
    let row = state
        .gateway
        .insert(Table::ChatRooms, record)
        .await
        .map_err(|e| ApiError::database(FAILED, e, Exposure::Hidden))?;
    let stored: ChatRoom = from_record(row).map_err(|e| ApiError::database(FAILED, e, Exposure::Hidden))?;

    info!(room_id = %stored.id, name = %stored.name, "Created chat room");
    Ok(Json(CreateRoomResponse {
        room_id: stored.id,
        name: stored.name,
    }))
}
