//! SQLite implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::url_row::UrlRow;
use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// SQLite repository for URL records.
///
/// Mirrors [`super::PgUrlRepository`]; timestamps are stored as RFC 3339 text.
pub struct SqliteUrlRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for SqliteUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls ("key", secret_key, target_url, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&new_record.key)
        .bind(&new_record.secret_key)
        .bind(&new_record.target_url)
        .bind(Utc::now())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_key(
        &self,
        key: &str,
        include_inactive: bool,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"SELECT * FROM urls WHERE "key" = ? AND (? OR is_active = 1)"#,
        )
        .bind(key)
        .bind(include_inactive)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_secret_key(
        &self,
        secret_key: &str,
        include_inactive: bool,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT * FROM urls WHERE secret_key = ? AND (? OR is_active = 1)",
        )
        .bind(secret_key)
        .bind(include_inactive)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_target_url(&self, target_url: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            "SELECT * FROM urls WHERE target_url = ? AND is_active = 1 ORDER BY id LIMIT 1",
        )
        .bind(target_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn record_click(&self, id: i64) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET clicks = clicks + 1, last_clicked_at = ?
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Into::into)
            .ok_or_else(|| AppError::not_found("URL record not found", json!({ "id": id })))
    }

    async fn deactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET is_active = 0, deactivated_at = ?
            WHERE secret_key = ? AND is_active = 1
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn reactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            UPDATE urls
            SET is_active = 1, deactivated_at = NULL
            WHERE secret_key = ? AND is_active = 0
            RETURNING *
            "#,
        )
        .bind(secret_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn stats(&self) -> Result<UrlStats, AppError> {
        let (total, active, clicks) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COALESCE(SUM(is_active), 0),
                COALESCE(SUM(clicks), 0)
            FROM urls
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UrlStats {
            total,
            active,
            clicks,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
