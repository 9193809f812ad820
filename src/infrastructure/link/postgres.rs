//! PostgreSQL link repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::link::{Link, LinkId, LinkRepository, NewLink, Page, ReadFilter};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// PostgreSQL implementation of `LinkRepository`
#[derive(Debug, Clone)]
pub struct PostgresLinkRepository {
    pool: PgPool,
}

impl PostgresLinkRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_link(row: &sqlx::postgres::PgRow) -> Result<Link, DomainError> {
    let read_err = |e: sqlx::Error| DomainError::storage(format!("Failed to read link row: {}", e));

    let id: i64 = row.try_get("id").map_err(read_err)?;
    let user_id: i64 = row.try_get("user_id").map_err(read_err)?;
    let url: String = row.try_get("url").map_err(read_err)?;
    let title: Option<String> = row.try_get("title").map_err(read_err)?;
    let read: bool = row.try_get("read").map_err(read_err)?;
    let date_added: DateTime<Utc> = row.try_get("date_added").map_err(read_err)?;

    Ok(Link::from_parts(
        LinkId::new(id),
        UserId::new(user_id),
        url,
        title,
        read,
        date_added,
    ))
}

/// SQL predicate for a read filter; `None` means no constraint
fn read_predicate(filter: ReadFilter) -> Option<bool> {
    match filter {
        ReadFilter::All => None,
        ReadFilter::Read => Some(true),
        ReadFilter::Unread => Some(false),
    }
}

#[async_trait]
impl LinkRepository for PostgresLinkRepository {
    async fn get(&self, id: LinkId) -> Result<Option<Link>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, url, title, read, date_added
            FROM links
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get link: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_link(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, link: NewLink) -> Result<Link, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO links (user_id, url, title, read)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, url, title, read, date_added
            "#,
        )
        .bind(link.user_id.as_i64())
        .bind(&link.url)
        .bind(&link.title)
        .bind(link.read)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to create link: {}", e)))?;

        row_to_link(&row)
    }

    async fn update(&self, link: &Link) -> Result<Link, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE links
            SET url = $2, title = $3, read = $4
            WHERE id = $1
            "#,
        )
        .bind(link.id().as_i64())
        .bind(link.url())
        .bind(link.title())
        .bind(link.read())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update link: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Link '{}' not found",
                link.id()
            )));
        }

        Ok(link.clone())
    }

    async fn delete(&self, id: LinkId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete link: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        filter: ReadFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Page<Link>, DomainError> {
        let total = self.count_for_user(user_id, filter).await?;

        let offset = i64::from(page.saturating_sub(1)) * i64::from(per_page);

        let rows = match read_predicate(filter) {
            Some(read) => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, url, title, read, date_added
                    FROM links
                    WHERE user_id = $1 AND read = $2
                    ORDER BY date_added DESC, id DESC
                    LIMIT $3 OFFSET $4
                    "#,
                )
                .bind(user_id.as_i64())
                .bind(read)
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, user_id, url, title, read, date_added
                    FROM links
                    WHERE user_id = $1
                    ORDER BY date_added DESC, id DESC
                    LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(user_id.as_i64())
                .bind(i64::from(per_page))
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list links: {}", e)))?;

        let items = rows
            .iter()
            .map(row_to_link)
            .collect::<Result<Vec<_>, _>>()?;

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
        let row = match read_predicate(filter) {
            Some(read) => {
                sqlx::query("SELECT COUNT(*) AS count FROM links WHERE user_id = $1 AND read = $2")
                    .bind(user_id.as_i64())
                    .bind(read)
                    .fetch_one(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT COUNT(*) AS count FROM links WHERE user_id = $1")
                    .bind(user_id.as_i64())
                    .fetch_one(&self.pool)
                    .await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to count links: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::storage(format!("Failed to read count: {}", e)))?;

        Ok(count as u64)
    }
}
