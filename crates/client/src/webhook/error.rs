//! Webhook forwarder error types.

use std::path::PathBuf;
use std::sync::Arc;

/// Errors from collecting and sending the record corpus.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// Endpoint missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Source directory missing or not a directory.
    #[error("data directory '{}' does not exist or is not a directory", .0.display())]
    Directory(PathBuf),

    /// Source directory could not be listed.
    #[error("failed to list '{}': {source}", path.display())]
    ReadDir { path: PathBuf, source: std::io::Error },

    /// Payload could not be encoded.
    #[error("failed to encode payload: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Endpoint answered with a non-2xx status.
    #[error("HTTP error: {status}")]
    HttpStatus { status: u16, body: String },

    /// Request timeout, in milliseconds.
    #[error("request to webhook timed out after {0}ms")]
    Timeout(u64),

    /// Could not connect to the endpoint.
    #[error("connection error: {0}")]
    Connection(Arc<reqwest::Error>),

    /// Any other network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl WebhookError {
    /// Process exit status for this failure.
    ///
    /// Timeouts exit with 2, connection failures with 3, everything else with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            WebhookError::Timeout(_) => 2,
            WebhookError::Connection(_) => 3,
            _ => 1,
        }
    }
}
