//! Target URL validation.
//!
//! A target is accepted when it parses as an absolute HTTP(S) URL with a host.
//! Callers store the parsed URL's serialization, so surrounding whitespace is
//! trimmed, tabs and newlines are dropped and non-ASCII characters are
//! percent-encoded before anything reaches a `Location` header.

use url::Url;

/// Reasons a target URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Parses `input` as a well-formed absolute URL.
///
/// # Rules
///
/// 1. Must parse as an absolute URL (relative references are rejected)
/// 2. Scheme must be `http` or `https`
/// 3. Must contain a non-empty host
///
/// # Errors
///
/// Returns the first violated rule as a [`UrlValidationError`].
///
/// The returned [`Url`] is the form to store; it may differ from `input`.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_target_url("https://example.com/path?q=1").is_ok());
/// assert!(validate_target_url("example.com").is_err());
/// assert!(validate_target_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlValidationError::MissingHost),
    }

    Ok(url)
}
