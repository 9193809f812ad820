//! Linkstash
//!
//! A bookmark-link API gated by per-user API keys:
//! - High-entropy key generation with SHA-256 digest storage
//! - Constant-time verification and digest-indexed credential resolution
//! - Guarded link CRUD with pagination and URL-title inference

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::warn;

use api::state::AppState;
use infrastructure::auth::CredentialResolver;
use infrastructure::link::{InMemoryLinkRepository, PostgresLinkRepository};
use infrastructure::title::HttpTitleFetcher;
use infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

/// Default connection pool size
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connect a PostgreSQL pool
pub async fn connect_pool(url: &str, max_connections: Option<u32>) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS))
        .connect(url)
        .await?;

    Ok(pool)
}

/// Build the application state from configuration
///
/// With a configured database URL the stores are PostgreSQL-backed;
/// without one the server runs on in-memory stores, which is only useful
/// for development.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let resolver = Arc::new(CredentialResolver::default());
    let titles = Arc::new(HttpTitleFetcher::new());

    match config.database.url.as_deref() {
        Some(url) => {
            let pool = connect_pool(url, config.database.max_connections).await?;

            Ok(AppState::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresLinkRepository::new(pool)),
                resolver,
                titles,
                config,
            ))
        }
        None => {
            warn!("No database configured; using in-memory stores");

            Ok(AppState::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryLinkRepository::new()),
                resolver,
                titles,
                config,
            ))
        }
    }
}
