//! Authentication core: key management and credential resolution

pub mod api_key;
pub mod jwt;
pub mod resolver;

pub use api_key::{ApiKeyManager, ApiKeyPair};
pub use jwt::{DisabledJwtAuthenticator, JwtAuthenticator};
pub use resolver::{AuthError, CredentialResolver, API_KEY_HEADER};
