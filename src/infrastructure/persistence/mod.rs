//! SQL repository implementations.
//!
//! Concrete implementations of the domain repository trait using SQLx with
//! bound parameters.
//!
//! - [`PgUrlRepository`] - PostgreSQL storage
//! - [`SqliteUrlRepository`] - SQLite storage (default for local runs)
//! - [`Database`] - Pool construction, migrations and backend selection

pub mod database;
pub mod pg_url_repository;
pub mod sqlite_url_repository;
mod url_row;

pub use database::Database;
pub use pg_url_repository::PgUrlRepository;
pub use sqlite_url_repository::SqliteUrlRepository;
