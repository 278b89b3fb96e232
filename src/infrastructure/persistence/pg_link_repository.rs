//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::NewLink;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Queries are bound at runtime over the shared pool; every operation is
/// a single statement, so no transaction wrapping is needed here - the
/// two-phase protocol lives one layer up in the service.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<i64, AppError> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO links (long_url, title) VALUES ($1, $2) RETURNING id",
        )
        .bind(&new_link.long_url)
        .bind(&new_link.title)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(id)
    }

    async fn set_short_code(&self, id: i64, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE links SET short_code = $2 WHERE id = $1")
            .bind(id)
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_long_url_by_id(&self, id: i64) -> Result<Option<String>, AppError> {
        let long_url =
            sqlx::query_scalar::<_, String>("SELECT long_url FROM links WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(long_url)
    }
}
