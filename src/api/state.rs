//! Application state for shared services

use std::sync::Arc;

use axum::http::StatusCode;

use crate::config::AppConfig;
use crate::domain::link::LinkRepository;
use crate::domain::user::UserRepository;
use crate::infrastructure::auth::{AuthError, CredentialResolver};
use crate::infrastructure::link::InMemoryLinkRepository;
use crate::infrastructure::title::{NoopTitleFetcher, TitleFetcher};
use crate::infrastructure::user::InMemoryUserRepository;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub links: Arc<dyn LinkRepository>,
    pub resolver: Arc<CredentialResolver>,
    pub titles: Arc<dyn TitleFetcher>,
    /// Status returned when the guard rejects a request; configurable to
    /// resolve the 401-vs-403 split between documented and deployed behavior
    pub unauthorized_status: StatusCode,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        resolver: Arc<CredentialResolver>,
        titles: Arc<dyn TitleFetcher>,
        config: &AppConfig,
    ) -> Self {
        Self {
            users,
            links,
            resolver,
            titles,
            unauthorized_status: StatusCode::from_u16(config.auth.unauthorized_status)
                .unwrap_or_else(|_| AuthError::AuthorizationRequired.suggested_status()),
        }
    }

    /// State backed by in-memory stores (development and tests)
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryLinkRepository::new()),
            Arc::new(CredentialResolver::default()),
            Arc::new(NoopTitleFetcher),
            config,
        )
    }
}
