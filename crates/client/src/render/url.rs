//! Crawl target validation.
//!
//! The cache key is computed over the URL string exactly as given, so this
//! module only checks that the target is something a browser can load. It
//! never rewrites it.

/// Error type for crawl target parsing failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// Parse a crawl target.
///
/// Rules:
/// 1. Empty or whitespace-only input is rejected
/// 2. The URL must be absolute (no scheme defaulting)
/// 3. Only `http` and `https` are allowed
pub fn parse_target(input: &str) -> Result<url::Url, UrlError> {
    if input.trim().is_empty() {
        return Err(UrlError::Empty);
    }

    let parsed = url::Url::parse(input).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }
}
