//! Link repository implementations

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryLinkRepository;
pub use postgres::PostgresLinkRepository;
