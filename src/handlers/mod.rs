// handlers/mod.rs - Route handlers
//
// Each handler performs one gateway call, upstream fetch or file read and
// maps the outcome to a response. Failures are returned as `ApiError`.

pub mod chat;
pub mod github;
pub mod health;
pub mod notice;
pub mod redirect;
pub mod task;
pub mod user;

use axum::response::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// `{"success": true}` body shared by the insert endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Success {
    pub success: bool,
}

impl Success {
    pub fn ok() -> Json<Self> {
        Json(Self { success: true })
    }
}

/// GET / - service index
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "onlysaid-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "chat": "/api/chat/create_room, /api/chat/insert_message (POST)",
            "task": "/api/task/create_task (POST)",
            "user": "/api/user/get_user_by_id, /api/user/get_user_by_username (GET)",
            "github": "/api/github/release (GET)",
            "notice": "/api/notice (GET)",
            "health": "/api/health, /api/health/ready (GET)",
            "redirect": "/api/redirect/third_party_login (GET)",
        }
    }))
}
