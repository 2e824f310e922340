// handlers/user/get_user_by_username.rs - GET /api/user/get_user_by_username handler

use axum::extract::{Query, State};
use serde::Deserialize;

use super::{find_user, required_param, UserLookup};
use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: Option<String>,
}

/// Returns the full profile, including `avatar` and `username`.
pub async fn get_user_by_username(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<UserLookup<UserProfile>, ApiError> {
    let username = required_param(query.username, "Username is required")?;

    Ok(match find_user(&state, "username", username).await? {
        Some(row) => UserLookup::Found(UserProfile::from(row)),
        None => UserLookup::Missing,
    })
}
