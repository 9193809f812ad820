//! Request-time credential resolution
//!
//! Maps inbound request headers to an authenticated user, trying the JWT
//! strategy first and falling back to the `x-api-key` header. All failure
//! causes collapse into one generic error so clients cannot distinguish an
//! unknown key from a missing credential.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};

use super::api_key::ApiKeyManager;
use super::jwt::{DisabledJwtAuthenticator, JwtAuthenticator};
use crate::domain::user::{User, UserRepository};

/// Header carrying the API key credential
pub const API_KEY_HEADER: &str = "x-api-key";

/// Authorization failure surfaced by the guard
///
/// Carries a suggested HTTP status; the boundary layer decides the final
/// mapping (deployments may prefer 403 over the default 401).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authorization is required to access this resource")]
    AuthorizationRequired,
}

impl AuthError {
    pub fn suggested_status(&self) -> StatusCode {
        match self {
            Self::AuthorizationRequired => StatusCode::UNAUTHORIZED,
        }
    }
}

/// Resolves inbound credentials to an authenticated user
#[derive(Debug, Clone)]
pub struct CredentialResolver {
    keys: ApiKeyManager,
    jwt: Arc<dyn JwtAuthenticator>,
}

impl Default for CredentialResolver {
    fn default() -> Self {
        Self::new(ApiKeyManager::new(), Arc::new(DisabledJwtAuthenticator))
    }
}

impl CredentialResolver {
    pub fn new(keys: ApiKeyManager, jwt: Arc<dyn JwtAuthenticator>) -> Self {
        Self { keys, jwt }
    }

    pub fn keys(&self) -> &ApiKeyManager {
        &self.keys
    }

    /// Extract the API key candidate from request headers
    ///
    /// Header lookup is case-insensitive; a present-but-empty value is
    /// treated as absent.
    pub fn extract_api_key(headers: &HeaderMap) -> Option<String> {
        let value = headers.get(API_KEY_HEADER)?.to_str().ok()?.trim();

        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Resolve request headers to an authenticated user
    ///
    /// Side-effect free beyond the store lookup: no writes, no key
    /// issuance, no caching across requests.
    pub async fn authorize(
        &self,
        headers: &HeaderMap,
        store: &dyn UserRepository,
    ) -> Result<User, AuthError> {
        let mut user = None;

        if let Some(authorization) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
            user = match self.jwt.user_from_jwt(authorization, store).await {
                Ok(user) => user,
                Err(err) => {
                    warn!(error = %err, "JWT resolution failed");
                    None
                }
            };
        }

        if user.is_none() {
            if let Some(api_key) = Self::extract_api_key(headers) {
                user = self.keys.resolve_user(store, &api_key).await;
            }
        }

        match user {
            Some(user) => {
                debug!(user_id = %user.id(), "Request authenticated");
                Ok(user)
            }
            None => Err(AuthError::AuthorizationRequired),
        }
    }
}
