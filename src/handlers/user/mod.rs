// handlers/user/mod.rs - Read-only user lookups
//
// Both lookups answer 404 {"exists": false} for an unknown user; that is a
// result, not an error. Each endpoint has its own named projection.

pub mod get_user_by_id;
pub mod get_user_by_username;

pub use get_user_by_id::get_user_by_id;
pub use get_user_by_username::get_user_by_username;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::database::models::{from_record, UserRow};
use crate::database::Table;
use crate::error::{ApiError, Exposure};
use crate::filter::Filter;
use crate::state::AppState;

const FAILED: &str = "Failed to fetch user";

/// Outcome of a user lookup.
#[derive(Debug)]
pub enum UserLookup<T> {
    Found(T),
    Missing,
}

impl<T: Serialize> IntoResponse for UserLookup<T> {
    fn into_response(self) -> Response {
        match self {
            UserLookup::Found(user) => Json(json!({ "exists": true, "user": user })).into_response(),
            UserLookup::Missing => (StatusCode::NOT_FOUND, Json(json!({ "exists": false }))).into_response(),
        }
    }
}

/// Trims a query parameter, treating blank as absent.
fn required_param(value: Option<String>, message: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::bad_request(message))
}

async fn find_user(state: &AppState, column: &str, value: String) -> Result<Option<UserRow>, ApiError> {
    let filter = Filter::new(Table::Users)
        .where_eq(column, value)
        .map_err(|e| ApiError::database(FAILED, e.into(), Exposure::Hidden))?;

    let row = state
        .gateway
        .select_first(filter)
        .await
        .map_err(|e| ApiError::database(FAILED, e, Exposure::Hidden))?;

    row.map(from_record::<UserRow>)
        .transpose()
        .map_err(|e| ApiError::database(FAILED, e, Exposure::Hidden))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_params_are_missing() {
        assert!(required_param(None, "User ID is required").is_err());
        assert!(required_param(Some("  ".to_string()), "User ID is required").is_err());
        assert_eq!(required_param(Some(" u-1 ".to_string()), "x").unwrap(), "u-1");
    }

    #[test]
    fn missing_lookup_is_404() {
        let response = UserLookup::<()>::Missing.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
