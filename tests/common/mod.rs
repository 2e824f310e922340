#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::{
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

use onlysaid_api::auth::SessionClaims;
use onlysaid_api::config::AppConfig;
use onlysaid_api::database::MemoryGateway;
use onlysaid_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub base_url: String,
    pub gateway: Arc<MemoryGateway>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Serves `router` on a free local port for the lifetime of the test runtime.
async fn serve_on_free_port(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .context("failed to bind test listener")?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(format!("http://127.0.0.1:{}", port))
}

pub async fn spawn_app() -> Result<TestApp> {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut AppConfig)) -> Result<TestApp> {
    let mut config = AppConfig::development();
    config.security.auth_secret = TEST_SECRET.to_string();
    config.api.enable_request_logging = false;
    configure(&mut config);

    let gateway = Arc::new(MemoryGateway::new());
    let state = AppState::new(config, gateway.clone())?;
    let base_url = serve_on_free_port(onlysaid_api::app(state)).await?;

    // Redirects are asserted on, never followed.
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(TestApp {
        base_url,
        gateway,
        client,
    })
}

/// Fake GitHub releases endpoint. Records the Authorization header it saw.
pub struct Upstream {
    pub releases_url: String,
    pub seen_authorization: Arc<Mutex<Option<String>>>,
}

pub async fn spawn_upstream(status: StatusCode, body: Value) -> Result<Upstream> {
    let seen_authorization = Arc::new(Mutex::new(None));
    let seen = seen_authorization.clone();

    let router = Router::new().route(
        "/repos/onlysaid/onlysaid/releases",
        get(move |headers: HeaderMap| {
            let seen = seen.clone();
            let body = body.clone();
            async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *seen.lock().unwrap() = auth;
                (status, Json(body))
            }
        }),
    );

    let base_url = serve_on_free_port(router).await?;
    Ok(Upstream {
        releases_url: format!("{}/repos/onlysaid/onlysaid/releases", base_url),
        seen_authorization,
    })
}

pub fn session_token(email: Option<&str>) -> String {
    let claims = SessionClaims {
        sub: Some("user-1".to_string()),
        email: email.map(str::to_string),
        name: Some("Alice".to_string()),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(TEST_SECRET.as_bytes()))
        .expect("failed to sign test session")
}

pub fn message_body(id: &str) -> Value {
    json!({
        "id": id,
        "created_at": "2024-05-01T10:00:00Z",
        "sender": {"id": "user-1", "username": "alice", "avatar": "https://cdn.example.com/alice.png"},
        "content": "hello there",
        "room_id": "room-1"
    })
}

pub fn task_body(task_id: &str) -> Value {
    json!({
        "task_id": task_id,
        "created_at": "2024-05-01T10:00:00Z",
        "start_time": "2024-05-01T10:00:05Z",
        "end_time": null,
        "assigner": "agent-planner",
        "assignee": "agent-search",
        "task_summarization": "Find recent releases",
        "room_id": "room-1",
        "context": {"query": "releases"},
        "tools_called": ["web_search"],
        "status": "pending",
        "result": null
    })
}
