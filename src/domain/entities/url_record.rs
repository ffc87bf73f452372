//! URL record entity: one shortened link and its click counters.

use chrono::{DateTime, Utc};

/// Lifecycle state of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Active,
    Inactive,
}

/// A shortened URL with admin secret and click tracking.
///
/// Records are never physically deleted; deactivation flips `is_active` and
/// stamps `deactivated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlRecord {
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

impl UrlRecord {
    /// Creates a freshly inserted, active record with no clicks.
    pub fn new(
        id: i64,
        key: String,
        secret_key: String,
        target_url: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            key,
            secret_key,
            target_url,
            is_active: true,
            clicks: 0,
            created_at,
            last_clicked_at: None,
            deactivated_at: None,
        }
    }

    pub fn state(&self) -> RecordState {
        if self.is_active {
            RecordState::Active
        } else {
            RecordState::Inactive
        }
    }
}

/// Input data for inserting a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrlRecord {
    pub key: String,
    pub secret_key: String,
    pub target_url: String,
}

/// Aggregate counters over the whole table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlStats {
    pub total: i64,
    pub active: i64,
    pub clicks: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let now = Utc::now();
        let record = UrlRecord::new(
            1,
            "abcde".to_string(),
            "abcde_12345678".to_string(),
            "https://example.com".to_string(),
            now,
        );

        assert_eq!(record.id, 1);
        assert_eq!(record.key, "abcde");
        assert!(record.is_active);
        assert_eq!(record.clicks, 0);
        assert_eq!(record.created_at, now);
        assert!(record.last_clicked_at.is_none());
        assert!(record.deactivated_at.is_none());
        assert_eq!(record.state(), RecordState::Active);
    }

    #[test]
    fn test_inactive_state() {
        let mut record = UrlRecord::new(
            2,
            "xyz12".to_string(),
            "xyz12_abcdefgh".to_string(),
            "https://rust-lang.org".to_string(),
            Utc::now(),
        );
        record.is_active = false;
        record.deactivated_at = Some(Utc::now());

        assert_eq!(record.state(), RecordState::Inactive);
    }
}
