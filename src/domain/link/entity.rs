//! Link entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Link identifier - a stable database-assigned integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(i64);

impl LinkId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LinkId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for LinkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A saved bookmark belonging to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    id: LinkId,
    user_id: UserId,
    url: String,
    /// Page title, inferred from the page when not supplied
    title: Option<String>,
    /// Whether the user has marked the link as read
    read: bool,
    date_added: DateTime<Utc>,
}

impl Link {
    pub fn from_parts(
        id: LinkId,
        user_id: UserId,
        url: String,
        title: Option<String>,
        read: bool,
        date_added: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            url,
            title,
            read,
            date_added,
        }
    }

    pub fn id(&self) -> LinkId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn read(&self) -> bool {
        self.read
    }

    pub fn date_added(&self) -> DateTime<Utc> {
        self.date_added
    }

    /// Whether the link belongs to the given user
    pub fn owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn set_read(&mut self, read: bool) {
        self.read = read;
    }
}

/// Fields required to create a link; the id and timestamp are assigned by
/// the store
#[derive(Debug, Clone)]
pub struct NewLink {
    pub user_id: UserId,
    pub url: String,
    pub title: Option<String>,
    pub read: bool,
}
