//! URL creation, resolution and administration service.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;

use crate::config::Config;
use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::key_generator::{
    GENERATED_KEY_LENGTH, random_key, secret_key_for, validate_custom_key,
};
use crate::utils::url_validator::validate_target_url;

/// Probes per generated key before giving up.
const MAX_KEY_ATTEMPTS: usize = 10;

/// Extra inserts attempted when a generated key loses an insert race.
const MAX_INSERT_RETRIES: usize = 3;

/// Settings the service needs from [`Config`].
#[derive(Debug, Clone)]
pub struct UrlServiceSettings {
    /// Public base URL without trailing slash.
    pub base_url: String,
    pub url_key_min_length: usize,
    pub url_key_max_length: usize,
    pub dedupe_target_urls: bool,
}

impl From<&Config> for UrlServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            url_key_min_length: config.url_key_min_length,
            url_key_max_length: config.url_key_max_length,
            dedupe_target_urls: config.dedupe_target_urls,
        }
    }
}

/// Service for creating, resolving and administering shortened URLs.
///
/// Lookups that can miss return `Ok(None)`; handlers decide how a miss is
/// reported because the 404 message names the request URL.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    settings: UrlServiceSettings,
}

impl UrlService {
    /// Creates a new URL service.
    pub fn new(repository: Arc<dyn UrlRepository>, settings: UrlServiceSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Public short URL for `key`: `base_url/key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/{}", self.settings.base_url, key)
    }

    /// Admin URL for `secret_key`: `base_url/admin/secret_key`.
    pub fn admin_url(&self, secret_key: &str) -> String {
        format!("{}/admin/{}", self.settings.base_url, secret_key)
    }

    /// Creates a shortened URL.
    ///
    /// # Key Selection
    ///
    /// - With `custom_key`: validated against the configured bounds and
    ///   rejected if any record (active or not) already uses it
    /// - Otherwise a random 5-character key is generated; when target dedup is
    ///   enabled an active record for the same target is returned instead
    ///
    /// A fresh secret key is derived for every new record. The target is
    /// stored in its parsed, escaped form rather than as submitted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - `target_url` is not an absolute HTTP(S) URL
    /// - `custom_key` is invalid or already taken
    ///
    /// Returns [`AppError::Internal`] if no unused key can be generated or on
    /// database errors.
    pub async fn create_url(
        &self,
        target_url: &str,
        custom_key: Option<String>,
    ) -> Result<UrlRecord, AppError> {
        let parsed = validate_target_url(target_url).map_err(|e| {
            AppError::bad_request("Invalid URL provided", json!({ "reason": e.to_string() }))
        })?;
        let target_url = parsed.as_str();

        match custom_key {
            Some(key) => self.create_with_custom_key(target_url, key).await,
            None => {
                if self.settings.dedupe_target_urls
                    && let Some(existing) = self.repository.find_by_target_url(target_url).await?
                {
                    tracing::debug!(key = %existing.key, "Reusing existing record for target");
                    return Ok(existing);
                }

                self.create_with_generated_key(target_url).await
            }
        }
    }

    async fn create_with_custom_key(
        &self,
        target_url: &str,
        key: String,
    ) -> Result<UrlRecord, AppError> {
        validate_custom_key(
            &key,
            self.settings.url_key_min_length,
            self.settings.url_key_max_length,
        )?;

        if self.repository.find_by_key(&key, true).await?.is_some() {
            return Err(key_taken(&key));
        }

        let new_record = NewUrlRecord {
            secret_key: secret_key_for(&key),
            key,
            target_url: target_url.to_string(),
        };
        let key = new_record.key.clone();

        self.repository
            .create(new_record)
            .await
            .map_err(|e| if e.is_conflict() { key_taken(&key) } else { e })
    }

    /// Inserts with a generated key, retrying with a fresh key if a concurrent
    /// creator claimed the same key between the probe and the insert.
    async fn create_with_generated_key(&self, target_url: &str) -> Result<UrlRecord, AppError> {
        let strategy = FixedInterval::new(Duration::from_millis(10)).take(MAX_INSERT_RETRIES);

        RetryIf::spawn(
            strategy,
            || self.insert_generated(target_url),
            |e: &AppError| {
                if e.is_conflict() {
                    tracing::warn!("Generated key collided on insert, retrying");
                    true
                } else {
                    false
                }
            },
        )
        .await
    }

    async fn insert_generated(&self, target_url: &str) -> Result<UrlRecord, AppError> {
        let key = self.generate_unique_key().await?;

        self.repository
            .create(NewUrlRecord {
                secret_key: secret_key_for(&key),
                key,
                target_url: target_url.to_string(),
            })
            .await
    }

    /// Generates a key that no record (active or inactive) uses.
    ///
    /// Attempts up to 10 times before failing.
    async fn generate_unique_key(&self) -> Result<String, AppError> {
        for _ in 0..MAX_KEY_ATTEMPTS {
            let key = random_key(GENERATED_KEY_LENGTH);

            if self.repository.find_by_key(&key, true).await?.is_none() {
                return Ok(key);
            }
        }

        Err(AppError::internal(
            "Failed to generate unique key",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves an active key for redirection and records the click.
    ///
    /// Returns the record with the incremented click count, or `None` if no
    /// active record uses `key`.
    pub async fn resolve(&self, key: &str) -> Result<Option<UrlRecord>, AppError> {
        let Some(record) = self.repository.find_by_key(key, false).await? else {
            return Ok(None);
        };

        let updated = self.repository.record_click(record.id).await?;
        tracing::debug!(key, clicks = updated.clicks, "Recorded click");

        Ok(Some(updated))
    }

    /// Looks up a record by secret key regardless of its state.
    pub async fn get_admin_info(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        self.repository.find_by_secret_key(secret_key, true).await
    }

    /// Deactivates an active record.
    ///
    /// Returns `None` when no active record has this secret key, including
    /// when the record is already inactive.
    pub async fn deactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = self.repository.deactivate(secret_key).await?;
        if let Some(ref r) = record {
            tracing::info!(key = %r.key, "Deactivated shortened URL");
        }
        Ok(record)
    }

    /// Reactivates an inactive record.
    ///
    /// Returns `None` when no inactive record has this secret key, including
    /// when the record is already active.
    pub async fn reactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError> {
        let record = self.repository.reactivate(secret_key).await?;
        if let Some(ref r) = record {
            tracing::info!(key = %r.key, "Re-activated shortened URL");
        }
        Ok(record)
    }

    /// Returns the target behind a full shortened URL without recording a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `shortened_url` is not under the
    /// configured base URL.
    /// Returns [`AppError::NotFound`] if no active record uses the key.
    pub async fn peek(&self, shortened_url: &str) -> Result<String, AppError> {
        let key = shortened_url
            .strip_prefix(self.settings.base_url.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                AppError::bad_request(
                    "Invalid domain name",
                    json!({ "expected_prefix": self.settings.base_url }),
                )
            })?;

        self.repository
            .find_by_key(key, false)
            .await?
            .map(|record| record.target_url)
            .ok_or_else(|| AppError::not_found("Target URL not found", json!({ "key": key })))
    }

    /// Counts records, active records and total clicks.
    pub async fn stats(&self) -> Result<UrlStats, AppError> {
        self.repository.stats().await
    }

    /// Checks that the store answers queries.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

fn key_taken(key: &str) -> AppError {
    AppError::bad_request(
        format!("The url_key '{key}' is already taken, please use another one"),
        json!({ "url_key": key }),
    )
}
