//! API key generation and verification
//!
//! Generates cryptographically secure API keys, derives the SHA-256 digest
//! stored on the user record, and resolves submitted keys back to users by
//! digest lookup. Plaintext keys are never stored or logged.

use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::user::{User, UserId, UserRepository};

/// Number of random bytes in a generated key (256 bits of entropy)
const KEY_BYTES: usize = 32;

/// Result of generating a new API key
///
/// Returned exactly once at issuance; only the hash is ever persisted.
#[derive(Debug, Clone)]
pub struct ApiKeyPair {
    /// The plaintext key, shown to the user a single time
    pub secret: String,
    /// SHA-256 hex digest of the secret, stored on the user record
    pub hash: String,
}

/// Generates and verifies API keys
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiKeyManager;

impl ApiKeyManager {
    pub fn new() -> Self {
        Self
    }

    /// Generate a new API key and its storable digest
    ///
    /// The secret is 32 random bytes hex-encoded (64 characters). The only
    /// failure mode is OS RNG exhaustion, which panics inside `fill_bytes`
    /// rather than returning a weak key.
    pub fn generate(&self) -> ApiKeyPair {
        let mut random_bytes = [0u8; KEY_BYTES];
        rand::thread_rng().fill_bytes(&mut random_bytes);

        let secret = hex::encode(random_bytes);
        let hash = self.hash_secret(&secret);

        ApiKeyPair { secret, hash }
    }

    /// SHA-256 hex digest of a secret's UTF-8 bytes
    pub fn hash_secret(&self, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Check a submitted secret against a stored digest
    ///
    /// Empty inputs are rejected up front without hashing; an absent
    /// credential is not attacker-controlled secret material, so the short
    /// circuit leaks nothing. The digest comparison itself is constant-time.
    pub fn verify(&self, secret: &str, stored_hash: &str) -> bool {
        if secret.is_empty() || stored_hash.is_empty() {
            return false;
        }

        let computed = self.hash_secret(secret);
        constant_time_compare(&computed, stored_hash)
    }

    /// Resolve a submitted secret to the user holding its digest
    ///
    /// This is the request-authentication path: digest-indexed lookup
    /// across all users. Store faults are logged and collapsed into "no
    /// user" so internal errors never reach the client.
    pub async fn resolve_user(&self, store: &dyn UserRepository, secret: &str) -> Option<User> {
        if secret.is_empty() {
            return None;
        }

        let hash = self.hash_secret(secret);

        match store.get_by_key_hash(&hash).await {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "User lookup by key hash failed");
                None
            }
        }
    }

    /// Check a submitted secret against one known user's stored digest
    ///
    /// Used for explicit re-authentication (key rotation), not for inbound
    /// request resolution. A user without an issued key never matches.
    pub async fn verify_user_key(
        &self,
        store: &dyn UserRepository,
        user_id: UserId,
        secret: &str,
    ) -> bool {
        if secret.is_empty() {
            return false;
        }

        let user = match store.get(user_id).await {
            Ok(Some(user)) => user,
            Ok(None) => return false,
            Err(err) => {
                warn!(error = %err, user_id = %user_id, "User fetch failed");
                return false;
            }
        };

        match user.api_key_hash() {
            Some(stored) => self.verify(secret, stored),
            None => false,
        }
    }
}

/// Constant-time string comparison to prevent timing attacks
///
/// Accumulates the XOR of every byte pair instead of returning at the first
/// mismatch, so execution time is independent of where the inputs differ.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut result = 0u8;

    for i in 0..a_bytes.len() {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}
