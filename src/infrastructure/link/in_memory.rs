//! In-memory link repository

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::link::{Link, LinkId, LinkRepository, NewLink, Page, ReadFilter};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// In-memory implementation of `LinkRepository`
#[derive(Debug, Default)]
pub struct InMemoryLinkRepository {
    links: Arc<RwLock<HashMap<i64, Link>>>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self {
            links: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn get(&self, id: LinkId) -> Result<Option<Link>, DomainError> {
        let links = self.links.read().await;
        Ok(links.get(&id.as_i64()).cloned())
    }

    async fn create(&self, link: NewLink) -> Result<Link, DomainError> {
        let mut links = self.links.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Link::from_parts(
            LinkId::new(id),
            link.user_id,
            link.url,
            link.title,
            link.read,
            Utc::now(),
        );

        links.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, link: &Link) -> Result<Link, DomainError> {
        let mut links = self.links.write().await;
        let id = link.id().as_i64();

        if !links.contains_key(&id) {
            return Err(DomainError::not_found(format!(
                "Link '{}' not found",
                link.id()
            )));
        }

        links.insert(id, link.clone());
        Ok(link.clone())
    }

    async fn delete(&self, id: LinkId) -> Result<bool, DomainError> {
        let mut links = self.links.write().await;
        Ok(links.remove(&id.as_i64()).is_some())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: ReadFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Link>, DomainError> {
        let links = self.links.read().await;

        let mut matching: Vec<Link> = links
            .values()
            .filter(|l| l.user_id() == user_id && filter.matches(l.read()))
            .cloned()
            .collect();

        // Newest first; id breaks ties for links created within the same tick
        matching.sort_by(|a, b| {
            b.date_added()
                .cmp(&a.date_added())
                .then(b.id().as_i64().cmp(&a.id().as_i64()))
        });

        let total = matching.len() as u64;
        let offset = (page.saturating_sub(1) as usize) * per_page as usize;
        let items: Vec<Link> = matching
            .into_iter()
            .skip(offset)
            .take(per_page as usize)
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total,
        })
    }

    async fn count_for_user(
        &self,
        user_id: UserId,
        filter: ReadFilter,
    ) -> Result<u64, DomainError> {
        let links = self.links.read().await;
        Ok(links
            .values()
            .filter(|l| l.user_id() == user_id && filter.matches(l.read()))
            .count() as u64)
    }
}
