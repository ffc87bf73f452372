//! DTOs for URL creation and admin info.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::UrlService;
use crate::domain::entities::UrlRecord;

/// Request body for `POST /url`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Destination URL; must be an absolute HTTP(S) URL.
    #[validate(length(min = 1, max = 2048, message = "Invalid URL provided"))]
    pub target_url: String,

    /// Optional custom key. Bounds and characters are checked by the service
    /// because the length limits are configurable.
    #[serde(default)]
    pub url_key: Option<String>,
}

/// Record details returned by `POST /url` and `GET /admin/{secret_key}`.
#[derive(Debug, Serialize)]
pub struct UrlInfoResponse {
    pub target_url: String,
    pub key: String,
    pub is_active: bool,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub deactivated_at: Option<DateTime<Utc>>,
    /// Public short URL: `base_url/key`.
    pub url: String,
    /// Admin URL: `base_url/admin/secret_key`.
    pub admin_url: String,
}

impl UrlInfoResponse {
    /// Builds the response, deriving `url` and `admin_url` from the service's
    /// base URL.
    pub fn from_record(record: UrlRecord, service: &UrlService) -> Self {
        Self {
            url: service.short_url(&record.key),
            admin_url: service.admin_url(&record.secret_key),
            target_url: record.target_url,
            key: record.key,
            is_active: record.is_active,
            clicks: record.clicks,
            created_at: record.created_at,
            last_clicked_at: record.last_clicked_at,
            deactivated_at: record.deactivated_at,
        }
    }
}
