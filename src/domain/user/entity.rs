//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User identifier - a stable database-assigned integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner integer value
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User entity for authentication
///
/// A user holds at most one active API key, stored only as its SHA-256
/// digest. The plaintext key is shown exactly once at issuance and never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    id: UserId,
    /// Display name
    name: String,
    /// SHA-256 digest of the active API key - never exposed in serialization
    #[serde(skip_serializing)]
    api_key_hash: Option<String>,
    /// Creation timestamp
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, api_key_hash: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            api_key_hash,
            created_at: Utc::now(),
        }
    }

    /// Rehydrate a user from stored fields
    pub fn from_parts(
        id: UserId,
        name: String,
        api_key_hash: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            api_key_hash,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Digest of the currently valid API key, if one has been issued
    pub fn api_key_hash(&self) -> Option<&str> {
        self.api_key_hash.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the stored key digest (key rotation)
    pub fn set_api_key_hash(&mut self, hash: impl Into<String>) {
        self.api_key_hash = Some(hash.into());
    }
}

/// Fields required to create a user; the id is assigned by the store
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub api_key_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_accessors() {
        let user = User::new(UserId::new(1), "alice", Some("abc123".to_string()));
        assert_eq!(user.api_key_hash(), Some("abc123"));
        assert_eq!(user.id().as_i64(), 1);
        assert_eq!(user.name(), "alice");
    }

    #[test]
    fn test_user_without_key() {
        let user = User::new(UserId::new(2), "bob", None);
        assert!(user.api_key_hash().is_none());
    }

    #[test]
    fn test_set_api_key_hash() {
        let mut user = User::new(UserId::new(1), "alice", None);
        user.set_api_key_hash("deadbeef");
        assert_eq!(user.api_key_hash(), Some("deadbeef"));
    }

    #[test]
    fn test_hash_not_serialized() {
        let user = User::new(UserId::new(1), "alice", Some("secret-digest".to_string()));
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-digest"));
        assert!(json.contains("alice"));
    }
}
