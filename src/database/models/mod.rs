pub mod chat_room;
pub mod message;
pub mod task;
pub mod user;

pub use chat_room::{ChatRoom, NewChatRoom, DEFAULT_ROOM_NAME};
pub use message::{IncomingMessage, MessageRow, MessageSender};
pub use task::Task;
pub use user::{UserProfile, UserRow, UserSummary};

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::database::gateway::Record;
use crate::database::manager::DatabaseError;

/// Serializes a model into the flat record the gateway stores.
pub fn to_record<T: Serialize>(model: &T) -> Result<Record, DatabaseError> {
    match serde_json::to_value(model) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DatabaseError::InvalidRecord(format!("expected an object, got {}", other))),
        Err(e) => Err(DatabaseError::InvalidRecord(e.to_string())),
    }
}

/// Decodes a row returned by the gateway. Unknown columns are ignored.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, DatabaseError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| DatabaseError::QueryError(format!("unexpected row shape: {}", e)))
}
