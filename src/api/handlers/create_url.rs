//! Handler for URL creation.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::url_info::{CreateUrlRequest, UrlInfoResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "url_key": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "target_url": "https://example.com",
///   "key": "my-link",
///   "is_active": true,
///   "clicks": 0,
///   "created_at": "2024-06-01T12:00:00Z",
///   "last_clicked_at": null,
///   "deactivated_at": null,
///   "url": "http://localhost:8000/my-link",
///   "admin_url": "http://localhost:8000/admin/my-link_Xa81kPq2"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the target URL is invalid or the custom key is
/// invalid or already taken.
pub async fn create_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<Json<UrlInfoResponse>, AppError> {
    payload.validate()?;

    let record = state
        .url_service
        .create_url(&payload.target_url, payload.url_key)
        .await?;

    tracing::info!(key = %record.key, "Created shortened URL");

    Ok(Json(UrlInfoResponse::from_record(
        record,
        &state.url_service,
    )))
}
