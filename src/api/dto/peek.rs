//! DTOs for the peek endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /peek`.
#[derive(Debug, Deserialize, Validate)]
pub struct PeekRequest {
    /// Full shortened URL, e.g. `http://localhost:8000/abcde`.
    #[validate(length(max = 256, message = "shortened_url must be at most 256 characters"))]
    pub shortened_url: String,
}

#[derive(Debug, Serialize)]
pub struct PeekResponse {
    pub target_url: String,
}
