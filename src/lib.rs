pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod state;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::DatabaseManager;
use crate::state::AppState;

/// Builds the full router over an already-constructed state.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config.api.max_request_size_bytes;
    let request_logging = state.config.api.enable_request_logging;
    let cors = cors_layer(&state.config.security);

    let router = Router::new()
        .route("/", get(handlers::root))
        .merge(chat_routes())
        .merge(task_routes())
        .merge(user_routes())
        .merge(proxy_routes())
        .merge(redirect_routes())
        .with_state(state)
        .layer(ServiceBuilder::new().layer(DefaultBodyLimit::max(body_limit)).layer(cors));

    if request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn chat_routes() -> Router<AppState> {
    use handlers::chat;

    Router::new()
        .route("/api/chat/create_room", post(chat::create_room))
        .route("/api/chat/insert_message", post(chat::insert_message))
}

fn task_routes() -> Router<AppState> {
    use handlers::task;

    Router::new().route("/api/task/create_task", post(task::create_task))
}

fn user_routes() -> Router<AppState> {
    use handlers::user;

    Router::new()
        .route("/api/user/get_user_by_id", get(user::get_user_by_id))
        .route("/api/user/get_user_by_username", get(user::get_user_by_username))
}

fn proxy_routes() -> Router<AppState> {
    use handlers::{github, health, notice};

    Router::new()
        .route("/api/github/release", get(github::release_get))
        .route("/api/notice", get(notice::notice_get))
        .route("/api/health", get(health::health_get))
        .route("/api/health/ready", get(health::ready_get))
}

fn redirect_routes() -> Router<AppState> {
    use handlers::redirect;

    Router::new().route("/api/redirect/third_party_login", get(redirect::third_party_login))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins = cors_origins(&security.cors_origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Parses configured origins. `*` cannot be combined with credentials, so it
/// is dropped along with anything that is not a valid header value.
fn cors_origins(configured: &[String]) -> Vec<HeaderValue> {
    configured
        .iter()
        .filter_map(|origin| {
            if origin.trim() == "*" {
                warn!("Ignoring wildcard CORS origin; list origins explicitly");
                return None;
            }
            match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect()
}

/// Runs the HTTP server until SIGINT/SIGTERM, then closes the gateway.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let gateway = DatabaseManager::gateway(&config.database).context("failed to initialize database gateway")?;
    let bind_addr = config.bind_addr();
    let environment = config.environment;

    let state = AppState::new(config, gateway.clone()).context("failed to build HTTP client")?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!(
        "onlysaid-api listening on http://{} ({:?}, {} gateway)",
        bind_addr,
        environment,
        gateway.backend()
    );

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    gateway.close().await;
    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
