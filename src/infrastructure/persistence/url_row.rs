//! Row mapping shared by the SQL backends.

use chrono::{DateTime, Utc};

use crate::domain::entities::UrlRecord;

/// Raw `urls` row as returned by `SELECT *` / `RETURNING *`.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UrlRow {
    pub id: i64,
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        Self {
            id: row.id,
            key: row.key,
            secret_key: row.secret_key,
            target_url: row.target_url,
            is_active: row.is_active,
            clicks: row.clicks,
            created_at: row.created_at,
            last_clicked_at: row.last_clicked_at,
            deactivated_at: row.deactivated_at,
        }
    }
}
