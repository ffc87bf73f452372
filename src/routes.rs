//! Router configuration.
//!
//! # Route Structure
//!
//! - `GET    /`                            - Welcome message
//! - `GET    /health`                      - Health check
//! - `POST   /url`                         - Create a shortened URL
//! - `POST   /peek`                        - Reveal a shortened URL's target
//! - `GET    /admin/{secret_key}`          - Record details
//! - `DELETE /admin/{secret_key}`          - Deactivate
//! - `GET    /admin/{secret_key}/activate` - Re-activate
//! - `GET    /{url_key}`                   - Redirect
//!
//! Static segments win over `/{url_key}`, so `url`, `peek`, `health` and
//! `admin` are rejected as custom keys.

use crate::api::handlers::{
    admin_info_handler, create_url_handler, deactivate_handler, health_handler, peek_handler,
    reactivate_handler, redirect_handler, root_handler,
};
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};
use tower_http::LatencyUnit;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Constructs the application router with all routes and request tracing.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/url", post(create_url_handler))
        .route("/peek", post(peek_handler))
        .route(
            "/admin/{secret_key}",
            get(admin_info_handler).delete(deactivate_handler),
        )
        .route("/admin/{secret_key}/activate", get(reactivate_handler))
        .route("/{url_key}", get(redirect_handler))
        .with_state(state)
        .layer(trace_layer())
}

/// Request span at `INFO` with method, URI and version; the response is logged
/// with status and latency in milliseconds.
fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
