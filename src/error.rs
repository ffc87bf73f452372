//! Application error type and its HTTP rendering.
//!
//! Every error leaves the service as `{"detail": "<message>"}` with a matching
//! status code. Internal errors are logged in full and rendered with a generic
//! message so database details never reach the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt::Display;
use validator::ValidationErrors;

use crate::utils::db_error::unique_violation_constraint;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// The 404 raised when a key or secret key matches nothing.
    ///
    /// `request_url` is the full URL the client asked for.
    pub fn url_not_found(request_url: impl Display) -> Self {
        Self::not_found(format!("URL '{request_url}' doesn't exist"), json!({}))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match self {
            AppError::Internal { message, details } => {
                tracing::error!(%message, %details, "Internal error");
                "Internal server error".to_string()
            }
            AppError::Validation { message, details }
            | AppError::NotFound { message, details }
            | AppError::Conflict { message, details } => {
                tracing::debug!(%status, %message, %details, "Request failed");
                message
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(constraint) = unique_violation_constraint(&e) {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": constraint }),
            );
        }

        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        for (field, field_errors) in errors.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for '{field}'"));
                return AppError::bad_request(message, json!({ "field": field.to_string() }));
            }
        }

        AppError::bad_request("Invalid request", json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_bad_request_renders_detail() {
        let (status, body) = body_of(AppError::bad_request("Invalid URL provided", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "detail": "Invalid URL provided" }));
    }

    #[tokio::test]
    async fn test_url_not_found_message() {
        let (status, body) = body_of(AppError::url_not_found("http://localhost:8000/abcde")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body["detail"],
            "URL 'http://localhost:8000/abcde' doesn't exist"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let error = AppError::internal("Database error", json!({ "reason": "connection refused" }));
        let (status, body) = body_of(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["detail"], "Internal server error");
    }

    #[test]
    fn test_display_uses_message() {
        let error = AppError::not_found("Target URL not found", json!({}));
        assert_eq!(error.to_string(), "Target URL not found");
        assert!(!error.is_conflict());
        assert!(AppError::conflict("dup", json!({})).is_conflict());
    }

    #[test]
    fn test_non_database_sqlx_error_is_internal() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(error, AppError::Internal { .. }));
    }
}
