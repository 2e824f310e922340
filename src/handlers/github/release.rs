// handlers/github/release.rs - GET /api/github/release handler

use axum::{extract::State, response::Json};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, warn};

use crate::config::GithubConfig;
use crate::error::ApiError;
use crate::state::AppState;

const FAILED: &str = "Failed to fetch releases";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("GitHub API responded with status {0}")]
    Status(reqwest::StatusCode),

    #[error("GitHub request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Relays the upstream release list verbatim.
pub async fn release_get(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match fetch_releases(&state.http, &state.config.github).await {
        Ok(releases) => Ok(Json(releases)),
        Err(e) => {
            error!(error = %e, url = %state.config.github.releases_url, "{}", FAILED);
            Err(ApiError::upstream(FAILED, e.to_string()))
        }
    }
}

/// Authorization is only attached when a token is configured.
pub fn release_headers(config: &GithubConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

    if let Some(token) = config.access_token.as_deref() {
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("GITHUB_ACCESS_TOKEN contains invalid header characters; sending unauthenticated request"),
        }
    }

    headers
}

pub async fn fetch_releases(client: &reqwest::Client, config: &GithubConfig) -> Result<Value, UpstreamError> {
    let response = client
        .get(&config.releases_url)
        .headers(release_headers(config))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(UpstreamError::Status(status));
    }

    Ok(response.json::<Value>().await?)
}
