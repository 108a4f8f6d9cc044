//! Unified error types for crawlmark.
//!
//! Display strings carry a stable code prefix so log lines can be grepped
//! by failure kind.

/// Unified error types for the crawl pipeline and record cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or unsupported crawl target.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// No cached record exists for the given URL.
    #[error("CACHE_MISS: {0}")]
    NotFound(String),

    /// Filesystem operation on the record cache failed.
    #[error("CACHE_ERROR: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be encoded or decoded.
    #[error("CACHE_ERROR: malformed record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Page rendering failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// Markdown generation failed.
    #[error("EXTRACT_FAILED: {0}")]
    ExtractFailed(String),
}

impl Error {
    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidUrl(_) => "INVALID_URL",
            Error::NotFound(_) => "CACHE_MISS",
            Error::Io(_) | Error::Serialization(_) => "CACHE_ERROR",
            Error::RenderFailed(_) => "RENDER_FAILED",
            Error::ExtractFailed(_) => "EXTRACT_FAILED",
        }
    }
}
