//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::Uri,
    response::Redirect,
};

use super::url_not_found;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an active key to its target URL.
///
/// # Endpoint
///
/// `GET /{url_key}`
///
/// # Request Flow
///
/// 1. Look up an active record by key
/// 2. Increment its click counter and stamp `last_clicked_at`
/// 3. Return 307 Temporary Redirect
///
/// Inactive records are treated as missing.
///
/// # Errors
///
/// Returns 404 Not Found naming the requested URL if no active record matches.
pub async fn redirect_handler(
    Path(url_key): Path<String>,
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Redirect, AppError> {
    match state.url_service.resolve(&url_key).await? {
        Some(record) => Ok(Redirect::temporary(&record.target_url)),
        None => Err(url_not_found(&state, &uri)),
    }
}
