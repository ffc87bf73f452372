//! Core domain entities.
//!
//! - [`UrlRecord`] - A stored short link
//! - [`NewUrlRecord`] - Insert payload for a record
//! - [`UrlStats`] - Table-wide counters

pub mod url_record;

pub use url_record::{NewUrlRecord, RecordState, UrlRecord, UrlStats};
