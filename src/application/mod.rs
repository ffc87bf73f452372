//! Application layer services implementing business logic.
//!
//! Services consume repository traits and give HTTP handlers and the admin CLI
//! a single API for every operation.
//!
//! - [`services::url_service::UrlService`] - Creation, redirects, admin transitions and peek

pub mod services;
