use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

use crate::error::ApiError;

/// Field name to problem description.
pub type FieldErrors = BTreeMap<String, String>;

/// Checks that go beyond what deserialization already enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Records an error when a required string field is blank.
pub fn require_non_empty(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), "This field is required".to_string());
    }
}

/// JSON body extractor that rejects with `ApiError` instead of axum's plain-text rejection.
///
/// An empty body is read as `{}` so optional-only payloads need no body at all.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_body(e.body_text()))?;

        let value = parse_body::<T>(&bytes)?;
        value
            .validate()
            .map_err(|field_errors| ApiError::validation_error("Missing required fields", field_errors))?;

        Ok(ValidatedJson(value))
    }
}

fn parse_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"{}" } else { bytes };
    serde_json::from_slice(body).map_err(|e| ApiError::invalid_body(e.to_string()))
}
