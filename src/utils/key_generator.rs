//! Short key generation and validation utilities.
//!
//! Generated keys are drawn from `[A-Za-z0-9]` using the thread-local
//! cryptographically secure RNG. Custom keys supplied by callers are validated
//! against configurable length bounds and `[A-Za-z0-9_-]`.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of keys produced by the generator.
pub const GENERATED_KEY_LENGTH: usize = 5;

/// Length of the random suffix appended to a key to build its secret key.
pub const SECRET_SUFFIX_LENGTH: usize = 8;

/// Keys that collide with fixed routes.
const RESERVED_KEYS: &[&str] = &["url", "peek", "admin", "health"];

static CUSTOM_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid key regex"));

/// Returns `length` random characters from `[A-Za-z0-9]`.
///
/// `rand::rng()` is a ChaCha-based CSPRNG seeded from the operating system.
pub fn random_key(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Builds the admin secret for `key`: the key, an underscore and eight random
/// alphanumerics.
pub fn secret_key_for(key: &str) -> String {
    format!("{}_{}", key, random_key(SECRET_SUFFIX_LENGTH))
}

/// Validates a caller-supplied key.
///
/// # Rules
///
/// - Length: `min_length..=max_length` characters
/// - Allowed characters: ASCII letters, digits, `_` and `-`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming the violated rule.
pub fn validate_custom_key(key: &str, min_length: usize, max_length: usize) -> Result<(), AppError> {
    if key.len() < min_length || key.len() > max_length {
        return Err(AppError::bad_request(
            format!("url_key must be {min_length}-{max_length} characters"),
            json!({ "provided_length": key.len() }),
        ));
    }

    if !CUSTOM_KEY_REGEX.is_match(key) {
        return Err(AppError::bad_request(
            "url_key can only contain letters, digits, underscores and hyphens",
            json!({ "url_key": key }),
        ));
    }

    if RESERVED_KEYS.contains(&key) {
        return Err(AppError::bad_request(
            format!("The url_key '{key}' is reserved"),
            json!({ "url_key": key }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_key_length_and_charset() {
        for length in [1, 5, 8, 32] {
            let key = random_key(length);
            assert_eq!(key.len(), length);
            assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_random_key_zero_length() {
        assert_eq!(random_key(0), "");
    }

    #[test]
    fn test_random_keys_are_distinct() {
        let keys: HashSet<String> = (0..1000).map(|_| random_key(GENERATED_KEY_LENGTH)).collect();
        assert!(keys.len() > 990);
    }

    #[test]
    fn test_secret_key_shape() {
        let secret = secret_key_for("abcde");
        let (key, suffix) = secret.split_once('_').unwrap();

        assert_eq!(key, "abcde");
        assert_eq!(suffix.len(), SECRET_SUFFIX_LENGTH);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_secret_keys_differ_for_same_key() {
        assert_ne!(secret_key_for("abcde"), secret_key_for("abcde"));
    }

    #[test]
    fn test_validate_accepts_allowed_characters() {
        assert!(validate_custom_key("my-Link_2024", 5, 32).is_ok());
        assert!(validate_custom_key("abcde", 5, 32).is_ok());
    }

    #[test]
    fn test_validate_length_bounds() {
        let err = validate_custom_key("abcd", 5, 32).unwrap_err();
        assert!(err.to_string().contains("5-32 characters"));

        assert!(validate_custom_key(&"a".repeat(32), 5, 32).is_ok());
        assert!(validate_custom_key(&"a".repeat(33), 5, 32).is_err());
    }

    #[test]
    fn test_validate_rejects_other_characters() {
        for key in ["my key", "hello!", "päth1", "a/b/c/d", "abc.def"] {
            let result = validate_custom_key(key, 1, 32);
            assert!(
                matches!(result, Err(AppError::Validation { .. })),
                "'{key}' should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_rejects_reserved_keys() {
        for &reserved in RESERVED_KEYS {
            assert!(validate_custom_key(reserved, 1, 32).is_err());
        }
    }
}
