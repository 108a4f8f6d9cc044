//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. `N8N_WEBHOOK_URL` (webhook endpoint only)
//! 2. Environment variables (CRAWLMARK_*)
//! 3. TOML config file (if CRAWLMARK_CONFIG_FILE set)
//! 4. Built-in defaults

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::sanitize::SectionFilter;

mod validation;

pub use validation::ConfigError;

/// Environment variable holding the webhook endpoint.
pub const WEBHOOK_URL_ENV: &str = "N8N_WEBHOOK_URL";

/// Endpoint used when `N8N_WEBHOOK_URL` is unset.
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:5678/webhook-test/86260a05-9971-4baa-a4af-f9b1e60894ee";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. `N8N_WEBHOOK_URL`
/// 2. Environment variables (CRAWLMARK_*)
/// 3. TOML config file (if CRAWLMARK_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding one JSON record per crawled URL.
    ///
    /// Set via CRAWLMARK_OUTPUT_DIR environment variable.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// User-Agent string sent by the headless browser.
    ///
    /// Set via CRAWLMARK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Pause before every page fetch, in milliseconds.
    ///
    /// Set via CRAWLMARK_REQUEST_DELAY_MS environment variable.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Page render timeout in milliseconds.
    ///
    /// Set via CRAWLMARK_RENDER_TIMEOUT_MS environment variable.
    #[serde(default = "default_render_timeout_ms")]
    pub render_timeout_ms: u64,

    /// Minimum character count for a content block to survive pruning.
    ///
    /// Set via CRAWLMARK_CHAR_THRESHOLD environment variable.
    #[serde(default = "default_char_threshold")]
    pub char_threshold: usize,

    /// Number of top-scoring candidates considered during pruning.
    ///
    /// Set via CRAWLMARK_MAX_TOP_CANDIDATES environment variable.
    #[serde(default = "default_max_top_candidates")]
    pub max_top_candidates: usize,

    /// HTML tags removed before markdown generation.
    #[serde(default = "default_excluded_tags")]
    pub excluded_tags: Vec<String>,

    /// Heading texts of sections stripped from every page.
    #[serde(default)]
    pub strip_sections: Vec<String>,

    /// Endpoint receiving the forwarded corpus.
    ///
    /// Set via N8N_WEBHOOK_URL (or CRAWLMARK_WEBHOOK_URL).
    #[serde(default = "default_webhook_url")]
    pub webhook_url: String,

    /// Webhook request timeout in milliseconds.
    ///
    /// Set via CRAWLMARK_WEBHOOK_TIMEOUT_MS environment variable.
    #[serde(default = "default_webhook_timeout_ms")]
    pub webhook_timeout_ms: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("ai_training_data")
}

fn default_user_agent() -> String {
    "crawlmark/0.1".into()
}

fn default_request_delay_ms() -> u64 {
    2_000
}

fn default_render_timeout_ms() -> u64 {
    30_000
}

fn default_char_threshold() -> usize {
    200
}

fn default_max_top_candidates() -> usize {
    5
}

fn default_excluded_tags() -> Vec<String> {
    ["form", "header", "footer", "nav"].map(String::from).to_vec()
}

fn default_webhook_url() -> String {
    DEFAULT_WEBHOOK_URL.into()
}

fn default_webhook_timeout_ms() -> u64 {
    30_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            user_agent: default_user_agent(),
            request_delay_ms: default_request_delay_ms(),
            render_timeout_ms: default_render_timeout_ms(),
            char_threshold: default_char_threshold(),
            max_top_candidates: default_max_top_candidates(),
            excluded_tags: default_excluded_tags(),
            strip_sections: Vec::new(),
            webhook_url: default_webhook_url(),
            webhook_timeout_ms: default_webhook_timeout_ms(),
        }
    }
}

impl AppConfig {
    /// Pre-fetch delay as Duration.
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    /// Webhook timeout as Duration for use with reqwest.
    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_millis(self.webhook_timeout_ms)
    }

    /// Configured section filters, one per `strip_sections` entry.
    pub fn section_filters(&self) -> Vec<SectionFilter> {
        self.strip_sections.iter().map(SectionFilter::new).collect()
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment()
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Webhook endpoint, checked only when the forwarder runs.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the endpoint is set but empty.
    pub fn require_webhook_url(&self) -> Result<&str, ConfigError> {
        let url = self.webhook_url.trim();
        if url.is_empty() {
            return Err(ConfigError::Missing {
                field: "webhook_url".into(),
                hint: format!("Set the {WEBHOOK_URL_ENV} environment variable to the webhook URL"),
            });
        }
        Ok(url)
    }

    fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("CRAWLMARK_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment
            .merge(
                Env::prefixed("CRAWLMARK_")
                    .ignore(&["CONFIG_FILE"])
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
            .merge(Env::raw().only(&[WEBHOOK_URL_ENV]).map(|_| "webhook_url".into()))
    }
}
