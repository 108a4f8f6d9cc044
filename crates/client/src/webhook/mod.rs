//! Webhook forwarder.
//!
//! Sends every JSON record found in a directory to a webhook endpoint as a
//! single batch.
//!
//! ### Request
//!
//! - **Method**: `POST`, `Content-Type: application/json`
//! - **Body**: `{ "data": [...], "metadata": { "total_files", "total_items" } }`
//! - **Timeout**: 30s by default
//! - **Success**: any 2xx status; nothing is retried

pub mod error;
pub mod payload;

pub use error::WebhookError;
pub use payload::{Payload, PayloadMetadata, collect_payload, json_files};

use crawlmark_core::AppConfig;
use reqwest::header;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters of the endpoint shown in logs.
const URL_PREFIX_LEN: usize = 10;

/// Characters of a successful response body shown in logs.
const BODY_PREVIEW_LEN: usize = 200;

/// Webhook client configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Endpoint URL.
    pub url: String,
    /// Request timeout (default: 30s).
    pub timeout: Duration,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), timeout: DEFAULT_TIMEOUT }
    }

    /// Build from application config.
    ///
    /// Fails if the configured endpoint is empty.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, WebhookError> {
        let url = config
            .require_webhook_url()
            .map_err(|e| WebhookError::Config(e.to_string()))?;
        Ok(Self { url: url.to_string(), timeout: config.webhook_timeout() })
    }
}

/// Outcome of a successful POST.
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

/// Outcome of forwarding a directory.
#[derive(Debug, Clone)]
pub enum ForwardReport {
    /// No JSON files were found; nothing was sent.
    NoFiles,
    /// The batch was accepted.
    Sent { metadata: PayloadMetadata, status: u16 },
}

/// HTTP client for the webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    config: WebhookConfig,
}

impl WebhookClient {
    /// Create a new webhook client with the given configuration.
    pub fn new(config: WebhookConfig) -> Result<Self, WebhookError> {
        if config.url.trim().is_empty() {
            return Err(WebhookError::Config("webhook URL is empty".into()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| WebhookError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// POST `payload` once.
    ///
    /// Non-2xx statuses, timeouts and connection failures are distinct errors.
    pub async fn send(&self, payload: &Payload) -> Result<WebhookResponse, WebhookError> {
        let body = serde_json::to_vec(payload)?;

        tracing::info!("sending data to webhook ({} items)", payload.metadata.total_items);
        tracing::info!("payload size: {} bytes", body.len());
        tracing::info!("webhook URL prefix: {}", url_prefix(&self.config.url));

        let start = Instant::now();
        let response = self
            .http
            .post(&self.config.url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        tracing::info!("response status code: {}", status.as_u16());
        tracing::debug!("response headers: {:?}", response.headers());

        let text = response.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!("webhook answered in {:?}", start.elapsed());

        if !status.is_success() {
            return Err(WebhookError::HttpStatus { status: status.as_u16(), body: text });
        }

        Ok(WebhookResponse { status: status.as_u16(), body: text })
    }

    /// Collect every JSON file in `dir` and send them as one batch.
    ///
    /// Nothing is sent when the directory holds no JSON files.
    pub async fn forward_dir(&self, dir: &Path) -> Result<ForwardReport, WebhookError> {
        let Some(payload) = collect_payload(dir).await? else {
            tracing::info!("no JSON files found in '{}'", dir.display());
            return Ok(ForwardReport::NoFiles);
        };

        let response = self.send(&payload).await?;
        tracing::info!(
            "success, data sent to webhook. Response content (first {} chars): {}",
            BODY_PREVIEW_LEN,
            preview(&response.body, BODY_PREVIEW_LEN)
        );

        Ok(ForwardReport::Sent { metadata: payload.metadata, status: response.status })
    }

    fn classify(&self, err: reqwest::Error) -> WebhookError {
        if err.is_timeout() {
            WebhookError::Timeout(self.config.timeout.as_millis() as u64)
        } else if err.is_connect() {
            WebhookError::Connection(Arc::new(err))
        } else {
            WebhookError::Network(Arc::new(err))
        }
    }
}

/// Endpoint shortened for logs so the full secret path isn't printed.
fn url_prefix(url: &str) -> String {
    if url.chars().count() > URL_PREFIX_LEN {
        format!("{}...", url.chars().take(URL_PREFIX_LEN).collect::<String>())
    } else {
        "...".to_string()
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
