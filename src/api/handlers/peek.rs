//! Handler for previewing a shortened URL's target.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::peek::{PeekRequest, PeekResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Reveals the target behind a shortened URL without following it.
///
/// # Endpoint
///
/// `POST /peek`
///
/// # Request Body
///
/// ```json
/// { "shortened_url": "http://localhost:8000/abcde" }
/// ```
///
/// # Response
///
/// ```json
/// { "target_url": "https://example.com" }
/// ```
///
/// No click is recorded.
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is not under this service's base URL.
/// Returns 404 Not Found if no active record uses the key.
pub async fn peek_handler(
    State(state): State<AppState>,
    Json(payload): Json<PeekRequest>,
) -> Result<Json<PeekResponse>, AppError> {
    payload.validate()?;

    let target_url = state.url_service.peek(&payload.shortened_url).await?;

    Ok(Json(PeekResponse { target_url }))
}
