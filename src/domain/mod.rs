//! Domain layer - Core business logic and entities

pub mod error;
pub mod link;
pub mod user;

pub use error::DomainError;
pub use link::{Link, LinkId, LinkRepository, NewLink, Page, ReadFilter};
pub use user::{NewUser, User, UserId, UserRepository};
