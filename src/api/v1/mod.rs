//! Bookmark API endpoints, served under /api

pub mod links;
pub mod user;

use axum::{
    routing::get,
    Router,
};

use super::state::AppState;

/// Create the /api router
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/user", get(user::get_user))
        .route("/links", get(links::list_links).post(links::create_link))
        .route(
            "/links/{id}",
            get(links::get_link)
                .patch(links::update_link)
                .delete(links::delete_link),
        )
}
