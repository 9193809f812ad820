//! Current-user endpoint handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::middleware::CurrentUser;
use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::link::ReadFilter;

/// Response for GET /api/user
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    /// Total links saved by this user
    pub links: u64,
}

/// GET /api/user
///
/// Returns information about the authenticated user.
pub async fn get_user(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let links = state
        .links
        .count_for_user(user.id(), ReadFilter::All)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(UserResponse {
        id: user.id().as_i64(),
        name: user.name().to_string(),
        links,
    }))
}
