//! Link domain module

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{Link, LinkId, NewLink};
pub use repository::{LinkRepository, Page, ReadFilter};
pub use validation::{validate_title, validate_url, LinkValidationError};
