//! User domain module

pub mod entity;
pub mod repository;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
