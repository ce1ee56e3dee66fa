//! SQLite implementation of the link cache.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::CachedLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct CachedLinkRow {
    original_url: String,
    affiliate_url: String,
    updated_at: DateTime<Utc>,
}

impl From<CachedLinkRow> for CachedLink {
    fn from(row: CachedLinkRow) -> Self {
        CachedLink::new(row.original_url, row.affiliate_url, row.updated_at)
    }
}

/// SQLite repository backed by the `cached_links` table.
///
/// The table is created by the embedded migrations (see
/// [`crate::infrastructure::persistence::run_migrations`]).
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn get(&self, original_url: &str) -> Result<Option<String>, AppError> {
        let affiliate_url = sqlx::query_scalar::<_, String>(
            "SELECT affiliate_url FROM cached_links WHERE original_url = ?",
        )
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(affiliate_url)
    }

    async fn put(&self, original_url: &str, affiliate_url: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO cached_links (original_url, affiliate_url, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT (original_url) DO UPDATE SET
                affiliate_url = excluded.affiliate_url,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(original_url)
        .bind(affiliate_url)
        .bind(Utc::now())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn list(&self, limit: i64) -> Result<Vec<CachedLink>, AppError> {
        let rows = sqlx::query_as::<_, CachedLinkRow>(
            r#"
            SELECT original_url, affiliate_url, updated_at
            FROM cached_links
            ORDER BY updated_at DESC, original_url
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(CachedLink::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cached_links")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
