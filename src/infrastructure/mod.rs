//! Infrastructure layer - External service implementations

pub mod auth;
pub mod link;
pub mod logging;
pub mod title;
pub mod user;
