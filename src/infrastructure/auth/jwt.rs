//! JWT credential resolution extension point
//!
//! Bearer-token authentication is not implemented: the shipped
//! authenticator resolves no user, and the claim structure and signing
//! scheme are intentionally left unspecified. A real implementation can be
//! plugged into [`CredentialResolver`](super::CredentialResolver) without
//! changing the guard's contract.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::domain::user::{User, UserRepository};
use crate::domain::DomainError;

/// Strategy for resolving a user from an `Authorization` header
#[async_trait]
pub trait JwtAuthenticator: Send + Sync + Debug {
    /// Attempt to validate a bearer token and resolve its user
    async fn user_from_jwt(
        &self,
        authorization: &str,
        store: &dyn UserRepository,
    ) -> Result<Option<User>, DomainError>;
}

/// Stub authenticator that resolves no user
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledJwtAuthenticator;

#[async_trait]
impl JwtAuthenticator for DisabledJwtAuthenticator {
    async fn user_from_jwt(
        &self,
        _authorization: &str,
        _store: &dyn UserRepository,
    ) -> Result<Option<User>, DomainError> {
        Ok(None)
    }
}
