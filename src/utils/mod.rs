//! Utility functions for key generation, URL validation, and database errors.
//!
//! - [`key_generator`] - Random key generation and custom key validation
//! - [`url_validator`] - Target URL validation
//! - [`db_error`] - Unique-violation detection

pub mod db_error;
pub mod key_generator;
pub mod url_validator;
