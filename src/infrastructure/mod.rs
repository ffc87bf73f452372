//! Infrastructure layer for external integrations.
//!
//! Implements the repository interfaces defined by the domain layer.
//!
//! - [`persistence`] - PostgreSQL and SQLite repository implementations

pub mod persistence;
