// handlers/user/get_user_by_id.rs - GET /api/user/get_user_by_id handler

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{find_user, required_param, UserLookup};
use crate::database::models::UserSummary;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: Option<String>,
}

/// Returns `{exists: true, user: {id, name, email}}` for a known id.
pub async fn get_user_by_id(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<UserLookup<UserSummary>, ApiError> {
    let user_id = required_param(query.user_id, "User ID is required")?;

    Ok(match find_user(&state, "id", user_id).await? {
        Some(row) => UserLookup::Found(UserSummary::from(row)),
        None => UserLookup::Missing,
    })
}
