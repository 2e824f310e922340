use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::middleware::validate_body::{require_non_empty, FieldErrors, Validate};

/// The sender object as the client sends it; extra user fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageSender {
    pub id: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Body of `POST /api/chat/insert_message`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingMessage {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub sender: MessageSender,
    #[serde(default)]
    pub content: String,
    pub room_id: String,
}

impl Validate for IncomingMessage {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require_non_empty(&mut errors, "id", &self.id);
        require_non_empty(&mut errors, "sender.id", &self.sender.id);
        require_non_empty(&mut errors, "room_id", &self.room_id);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Row layout of the `messages` table: the sender object is flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub sender: String,
    pub content: String,
    pub avatar: Option<String>,
    pub room_id: String,
}

impl From<IncomingMessage> for MessageRow {
    fn from(message: IncomingMessage) -> Self {
        Self {
            id: message.id,
            created_at: message.created_at,
            sender: message.sender.id,
            content: message.content,
            avatar: message.sender.avatar,
            room_id: message.room_id,
        }
    }
}
