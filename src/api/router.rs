use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints (unauthenticated probes)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        // Bookmark API (guarded per-handler)
        .nest("/api", v1::create_api_router())
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
