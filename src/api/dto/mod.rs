//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod detail;
pub mod health;
pub mod peek;
pub mod url_info;
