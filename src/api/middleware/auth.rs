//! Authorization guard middleware
//!
//! Handlers that take a [`CurrentUser`] argument never run their body
//! unless credential resolution succeeds; the extractor rejects the request
//! first with the configured unauthorized status.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Extractor binding the authenticated user into a protected handler
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = state
            .resolver
            .authorize(&parts.headers, state.users.as_ref())
            .await
            .map_err(|err| ApiError::new(state.unauthorized_status, err.to_string()))?;

        debug!(user_id = %user.id(), "Guard resolved current user");
        Ok(CurrentUser(user))
    }
}
