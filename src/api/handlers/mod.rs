//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod admin;
pub mod create_url;
pub mod health;
pub mod peek;
pub mod redirect;
pub mod root;

pub use admin::{admin_info_handler, deactivate_handler, reactivate_handler};
pub use create_url::create_url_handler;
pub use health::health_handler;
pub use peek::peek_handler;
pub use redirect::redirect_handler;
pub use root::root_handler;

use axum::http::Uri;

use crate::error::AppError;
use crate::state::AppState;

/// 404 naming the URL the client requested, rebuilt from the configured base
/// URL so it matches the links this service hands out.
fn url_not_found(state: &AppState, uri: &Uri) -> AppError {
    let path = uri.path_and_query().map_or(uri.path(), |pq| pq.as_str());
    AppError::url_not_found(format!("{}{}", state.url_service.base_url(), path))
}
