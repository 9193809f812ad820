//! Link repository trait and pagination types

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Link, LinkId, NewLink};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Read-status filter for link listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadFilter {
    All,
    Read,
    /// Only links not yet marked read (the default view)
    #[default]
    Unread,
}

impl ReadFilter {
    /// Parse the `show` query parameter
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(Self::All),
            "read" => Some(Self::Read),
            "unread" => Some(Self::Unread),
            _ => None,
        }
    }

    /// Whether a link with the given read status passes the filter
    pub fn matches(&self, read: bool) -> bool {
        match self {
            Self::All => true,
            Self::Read => read,
            Self::Unread => !read,
        }
    }
}

/// One page of a link listing, ordered by date added descending
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number
    pub page: u32,
    pub per_page: u32,
    /// Total items matching the filter, across all pages
    pub total: u64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            self.total.div_ceil(u64::from(self.per_page)) as u32
        }
    }

    pub fn next_page(&self) -> Option<u32> {
        if self.page < self.total_pages() {
            Some(self.page + 1)
        } else {
            None
        }
    }
}

/// Repository trait for link storage
#[async_trait]
pub trait LinkRepository: Send + Sync + Debug {
    /// Get a link by its ID
    async fn get(&self, id: LinkId) -> Result<Option<Link>, DomainError>;

    /// Create a new link, returning it with its assigned ID and timestamp
    async fn create(&self, link: NewLink) -> Result<Link, DomainError>;

    /// Update an existing link
    async fn update(&self, link: &Link) -> Result<Link, DomainError>;

    /// Delete a link, returning whether it existed
    async fn delete(&self, id: LinkId) -> Result<bool, DomainError>;

    /// List one page of a user's links, newest first
    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: ReadFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Link>, DomainError>;

    /// Count a user's links matching the filter
    async fn count_for_user(&self, user_id: UserId, filter: ReadFilter)
        -> Result<u64, DomainError>;
}
