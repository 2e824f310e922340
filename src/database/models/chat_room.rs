use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name given to rooms created without one.
pub const DEFAULT_ROOM_NAME: &str = "New Chat";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewChatRoom {
    pub name: String,
    pub unread: i64,
    pub active_users: Vec<String>,
}

impl NewChatRoom {
    /// Builds a room from the raw `name` field of a request.
    ///
    /// Missing, `null`, `false`, `0` and `""` get the placeholder. Strings are
    /// stored exactly as sent; truthy numbers and `true` are stored as their
    /// JSON text.
    pub fn named(name: Option<&Value>) -> Self {
        let name = match name {
            Some(value) if !is_falsy(value) => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
            _ => DEFAULT_ROOM_NAME.to_string(),
        };
        Self {
            name,
            unread: 0,
            active_users: Vec::new(),
        }
    }
}

/// Whether a JSON value counts as "no name given".
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// A stored room. `id` keeps whatever JSON form the store generated.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRoom {
    pub id: Value,
    pub name: String,
    #[serde(default)]
    pub unread: i64,
    #[serde(default)]
    pub active_users: Vec<String>,
}
