//! Handler for the service root.

use axum::Json;

/// Returns a welcome string.
///
/// # Endpoint
///
/// `GET /`
pub async fn root_handler() -> Json<&'static str> {
    Json("Welcome to the URL shortener API :)")
}
