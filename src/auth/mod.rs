use axum::http::HeaderMap;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

/// Claims of a session token issued by the external auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: i64,
}

/// A resolved session. Only sessions carrying an email resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub email: String,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session secret not configured")]
    SecretMissing,

    #[error("No session token in request")]
    TokenMissing,

    #[error("Invalid session token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Session has no email")]
    EmailMissing,
}

/// Resolves the session from `Authorization: Bearer` or the session cookie.
pub fn resolve_session(headers: &HeaderMap, security: &SecurityConfig) -> Result<Session, SessionError> {
    if security.auth_secret.is_empty() {
        return Err(SessionError::SecretMissing);
    }

    let token = extract_token(headers, &security.session_cookie).ok_or(SessionError::TokenMissing)?;

    let decoding_key = DecodingKey::from_secret(security.auth_secret.as_bytes());
    let claims = decode::<SessionClaims>(&token, &decoding_key, &Validation::default())?.claims;

    match claims.email {
        Some(email) if !email.trim().is_empty() => Ok(Session { email }),
        _ => Err(SessionError::EmailMissing),
    }
}

fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(auth) = headers.typed_get::<Authorization<Bearer>>() {
        let token = auth.token().trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    // Quoted cookie values are legal; the token is what's inside the quotes.
    CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value_trimmed().to_string())
        .filter(|token| !token.is_empty())
}
