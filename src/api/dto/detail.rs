//! Confirmation message DTO.

use serde::Serialize;

/// `{"detail": "..."}` body returned by the deactivate and reactivate endpoints.
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub detail: String,
}

impl DetailResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
