use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A row of the `users` table. Read-only for this service.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRow {
    pub id: Value,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Projection returned by the by-id lookup: `{id, name, email}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: Value,
    pub name: String,
    pub email: Option<String>,
}

/// Projection returned by the by-username lookup; `name` mirrors `username`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: Value,
    pub name: String,
    pub username: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

impl From<UserRow> for UserSummary {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.username,
            email: row.email,
        }
    }
}

impl From<UserRow> for UserProfile {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.username.clone(),
            username: row.username,
            email: row.email,
            avatar: row.avatar,
        }
    }
}
