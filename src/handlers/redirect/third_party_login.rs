// handlers/redirect/third_party_login.rs - GET /api/redirect/third_party_login handler

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::auth::resolve_session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRedirectQuery {
    pub locale: Option<String>,
}

/// Sends a signed-in user to the localized landing page with their email,
/// everyone else to the sign-in page. Never answers with an error body.
pub async fn third_party_login(
    State(state): State<AppState>,
    Query(query): Query<LoginRedirectQuery>,
    headers: HeaderMap,
) -> Response {
    let security = &state.config.security;

    match resolve_session(&headers, security) {
        Ok(session) => {
            let locale = normalize_locale(query.locale.as_deref(), &security.default_locale);
            debug!(locale = %locale, "Session resolved for third-party login");
            found(&localized_login_path(locale, &session.email), &security.signin_path)
        }
        Err(e) => {
            warn!(error = %e, "Session resolution failed; redirecting to sign-in");
            found(&security.signin_path, &security.signin_path)
        }
    }
}

/// 302 to `location`, or to `fallback` when `location` is not a valid header value.
fn found(location: &str, fallback: &str) -> Response {
    let value = HeaderValue::from_str(location)
        .or_else(|_| HeaderValue::from_str(fallback))
        .unwrap_or_else(|_| HeaderValue::from_static("/signin"));
    (StatusCode::FOUND, [(header::LOCATION, value)]).into_response()
}

pub fn localized_login_path(locale: &str, email: &str) -> String {
    // '@' is legal in a query component; keep it readable.
    let email: String = form_urlencoded::byte_serialize(email.as_bytes()).collect();
    format!("/{}/redirect/third_party_login?email={}", locale, email.replace("%40", "@"))
}

/// Accepts tags like `en`, `ja`, `zh-HK`; anything else becomes `default`.
pub fn normalize_locale<'a>(locale: Option<&'a str>, default: &'a str) -> &'a str {
    match locale.map(str::trim) {
        Some(tag) if is_locale_tag(tag) => tag,
        _ => default,
    }
}

fn is_locale_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .map(|p| (2..=3).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);
    primary_ok && parts.all(|p| (2..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()))
}
