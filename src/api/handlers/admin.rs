//! Handlers for secret-key administration (info, deactivate, reactivate).

use axum::{
    Json,
    extract::{Path, State},
    http::Uri,
};

use super::url_not_found;
use crate::api::dto::detail::DetailResponse;
use crate::api::dto::url_info::UrlInfoResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns record details for a secret key, active or not.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}`
///
/// # Errors
///
/// Returns 404 Not Found if no record has this secret key.
pub async fn admin_info_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<UrlInfoResponse>, AppError> {
    let record = state
        .url_service
        .get_admin_info(&secret_key)
        .await?
        .ok_or_else(|| url_not_found(&state, &uri))?;

    Ok(Json(UrlInfoResponse::from_record(
        record,
        &state.url_service,
    )))
}

/// Deactivates a shortened URL.
///
/// # Endpoint
///
/// `DELETE /admin/{secret_key}`
///
/// # Behavior
///
/// - The record is **not** removed; `is_active` is cleared and
///   `deactivated_at` set to now
/// - Redirects for the key return 404 until it is re-activated
/// - Admin info stays available
///
/// # Errors
///
/// Returns 404 Not Found if the record doesn't exist or is already inactive.
pub async fn deactivate_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<DetailResponse>, AppError> {
    let record = state
        .url_service
        .deactivate(&secret_key)
        .await?
        .ok_or_else(|| url_not_found(&state, &uri))?;

    Ok(Json(DetailResponse::new(format!(
        "Successfully deleted shortened URL for '{}'",
        record.target_url
    ))))
}

/// Re-activates a deactivated shortened URL and clears `deactivated_at`.
///
/// # Endpoint
///
/// `GET /admin/{secret_key}/activate`
///
/// # Errors
///
/// Returns 404 Not Found if the record doesn't exist. An already-active record
/// also yields 404, since only inactive records are eligible.
pub async fn reactivate_handler(
    Path(secret_key): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Json<DetailResponse>, AppError> {
    let record = state
        .url_service
        .reactivate(&secret_key)
        .await?
        .ok_or_else(|| url_not_found(&state, &uri))?;

    Ok(Json(DetailResponse::new(format!(
        "Successfully re-activated shortened URL for '{}'",
        record.target_url
    ))))
}
