// HTTP API Error Types
use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::database::DatabaseError;

/// Response header carrying the machine-readable error code.
pub static ERROR_CODE_HEADER: HeaderName = HeaderName::from_static("x-error-code");

/// Placeholder used when an underlying error renders as an empty string.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// HTTP API error. Every failing handler returns one of these, so the body
/// shape for a given status is decided here and nowhere else.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    InvalidBody(String),
    ValidationError {
        message: String,
        field_errors: BTreeMap<String, String>,
    },

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError {
        message: String,
        details: Option<String>,
    },

    // 500 Internal Server Error (external service issues)
    Upstream {
        message: String,
        cause: String,
    },

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

/// Whether a persistence failure's text is returned to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exposure {
    /// Logged only.
    Hidden,
    /// Logged and returned in the `details` field.
    Detailed,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::InvalidBody(_) => "Invalid request body",
            ApiError::ValidationError { message, .. } => message,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError { message, .. } => message,
            ApiError::Upstream { message, .. } => message,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError { .. } => "INTERNAL_SERVER_ERROR",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::InvalidBody(details) => json!({
                "error": self.message(),
                "details": details,
            }),
            ApiError::ValidationError { message, field_errors } => json!({
                "error": message,
                "details": field_errors,
            }),
            ApiError::InternalServerError { message, details: Some(details) } => json!({
                "error": message,
                "details": details,
            }),
            ApiError::Upstream { message, cause } => json!({
                "error": message,
                "message": cause,
            }),
            _ => json!({ "error": self.message() }),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn invalid_body(details: impl Into<String>) -> Self {
        ApiError::InvalidBody(details.into())
    }

    pub fn validation_error(message: impl Into<String>, field_errors: BTreeMap<String, String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError {
            message: message.into(),
            details: None,
        }
    }

    pub fn upstream(message: impl Into<String>, cause: impl Into<String>) -> Self {
        ApiError::Upstream {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    /// Maps a gateway failure. The cause is always logged; whether it also
    /// reaches the caller depends on `exposure`.
    pub fn database(message: impl Into<String>, err: DatabaseError, exposure: Exposure) -> Self {
        let message = message.into();
        tracing::error!(error = %err, "{}", message);

        match err {
            DatabaseError::Conflict { table, key } => {
                ApiError::conflict(format!("A record with key {} already exists in {}", key, table))
            }
            other => {
                let details = match exposure {
                    Exposure::Hidden => None,
                    Exposure::Detailed => Some(describe(&other)),
                };
                ApiError::InternalServerError { message, details }
            }
        }
    }
}

/// Error text for the `details` field, never empty.
pub fn describe(err: &dyn std::error::Error) -> String {
    let text = err.to_string();
    if text.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        text
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let mut response = (self.status_code(), Json(self.to_json())).into_response();
        response
            .headers_mut()
            .insert(ERROR_CODE_HEADER.clone(), HeaderValue::from_static(self.error_code()));
        response
    }
}
