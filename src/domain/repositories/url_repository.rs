//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrlRecord, UrlRecord, UrlStats};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// Every method is a single statement against the `urls` table, so each call
/// is atomic on its own.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteUrlRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new active record with zero clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if `key` or `secret_key` is already used.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError>;

    /// Finds a record by its public key.
    ///
    /// When `include_inactive` is false only active records match.
    async fn find_by_key(
        &self,
        key: &str,
        include_inactive: bool,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its secret key.
    ///
    /// When `include_inactive` is false only active records match.
    async fn find_by_secret_key(
        &self,
        secret_key: &str,
        include_inactive: bool,
    ) -> Result<Option<UrlRecord>, AppError>;

    /// Finds an active record already pointing at `target_url`.
    async fn find_by_target_url(&self, target_url: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Increments `clicks` and stamps `last_clicked_at` in one statement.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has this id.
    async fn record_click(&self, id: i64) -> Result<UrlRecord, AppError>;

    /// Deactivates the active record with this secret key.
    ///
    /// Returns `Ok(None)` if no record matches or it is already inactive.
    async fn deactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Reactivates the inactive record with this secret key and clears
    /// `deactivated_at`.
    ///
    /// Returns `Ok(None)` if no record matches or it is already active.
    async fn reactivate(&self, secret_key: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Counts records, active records and total clicks.
    async fn stats(&self) -> Result<UrlStats, AppError>;

    /// Round-trips a trivial query to check connectivity.
    async fn ping(&self) -> Result<(), AppError>;
}
