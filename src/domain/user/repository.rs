//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// The auth core only ever reads through `get` and `get_by_key_hash`; the
/// write operations exist for the admin CLI (user creation and key rotation).
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get the user whose stored key digest equals `hash`
    ///
    /// Lookup is by-hash, not by-secret; the store never sees plaintext
    /// keys. At most one user should ever match a given digest.
    async fn get_by_key_hash(&self, hash: &str) -> Result<Option<User>, DomainError>;

    /// Create a new user, returning it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Overwrite the stored key digest for a user (key rotation)
    async fn update_key_hash(&self, id: UserId, hash: &str) -> Result<(), DomainError>;

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count users
    async fn count(&self) -> Result<usize, DomainError>;
}
