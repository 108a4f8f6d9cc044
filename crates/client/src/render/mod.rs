//! Headless browser rendering.
//!
//! This module provides the renderer trait the crawler drives, and a
//! feature-gated implementation using chromiumoxide for headless
//! Chrome/Chromium control.

pub mod url;

pub use self::url::{UrlError, parse_target};

use ::url::Url;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during page rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Failed to launch or connect to browser.
    #[error("browser launch failed: {0}")]
    BrowserLaunch(String),

    /// Failed to navigate to URL.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Failed to get page content.
    #[error("content retrieval failed: {0}")]
    ContentRetrieval(String),

    /// Timeout waiting for page to load.
    #[error("render timeout after {0}ms")]
    Timeout(u64),
}

impl From<RenderError> for crawlmark_core::Error {
    fn from(err: RenderError) -> Self {
        crawlmark_core::Error::RenderFailed(err.to_string())
    }
}

/// Options for rendering a page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Timeout in milliseconds for the whole render (default: 30000).
    pub timeout_ms: u64,

    /// Pause after navigation for scripts to settle (default: 1000).
    pub settle_ms: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { timeout_ms: 30_000, settle_ms: 1_000 }
    }
}

impl RenderOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Result of rendering a page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Rendered HTML content.
    pub html: String,

    /// Final URL after redirects.
    pub final_url: Url,

    /// Time taken to render in milliseconds.
    pub render_time_ms: u64,
}

/// Renderer trait for headless browser page rendering.
#[async_trait::async_trait]
pub trait Renderer: Send + Sync {
    /// Render a URL to HTML.
    async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError>;
}

#[cfg(feature = "render")]
pub use headless::HeadlessRenderer;

#[cfg(feature = "render")]
mod headless {
    use super::{RenderError, RenderOptions, RenderedPage, Renderer};
    use chromiumoxide::Page;
    use chromiumoxide::browser::{Browser, BrowserConfig};
    use futures_util::StreamExt;
    use std::time::{Duration, Instant};
    use url::Url;

    /// Headless Chrome/Chromium renderer using chromiumoxide.
    ///
    /// Each render opens a fresh page in an incognito browser with the disk
    /// cache disabled, so nothing is reused between crawls.
    pub struct HeadlessRenderer {
        browser: Browser,
        handler: tokio::task::JoinHandle<()>,
    }

    impl HeadlessRenderer {
        /// Launch a headless browser identifying itself with `user_agent`.
        ///
        /// Chrome DevTools Protocol events are drained by a background task.
        pub async fn new(user_agent: &str) -> Result<Self, RenderError> {
            let config = BrowserConfig::builder()
                .arg(format!("--user-agent={user_agent}"))
                .arg("--incognito")
                .arg("--disk-cache-size=0")
                .build()
                .map_err(RenderError::BrowserLaunch)?;

            let (browser, mut handler) = Browser::launch(config)
                .await
                .map_err(|e| RenderError::BrowserLaunch(e.to_string()))?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        tracing::debug!("browser handler event error: {e}");
                        break;
                    }
                }
            });

            tracing::debug!("headless browser launched");
            Ok(Self { browser, handler })
        }

        /// Close the browser and stop the event task.
        pub async fn close(mut self) {
            if let Err(e) = self.browser.close().await {
                tracing::debug!("browser close failed: {e}");
            }
            self.handler.abort();
        }

        async fn load(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
            let start = Instant::now();
            let page = self
                .browser
                .new_page(url.as_str())
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))?;

            let result = read_page(&page, url, opts).await;
            page.close().await.ok();

            let (html, final_url) = result?;
            Ok(RenderedPage { html, final_url, render_time_ms: start.elapsed().as_millis() as u64 })
        }
    }

    async fn read_page(page: &Page, url: &Url, opts: &RenderOptions) -> Result<(String, Url), RenderError> {
        tokio::time::sleep(Duration::from_millis(opts.settle_ms)).await;

        let html = page
            .content()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let page_url = page
            .url()
            .await
            .map_err(|e| RenderError::ContentRetrieval(e.to_string()))?;

        let final_url = Url::parse(page_url.as_deref().unwrap_or(url.as_str()))
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        Ok((html, final_url))
    }

    #[async_trait::async_trait]
    impl Renderer for HeadlessRenderer {
        async fn render(&self, url: &Url, opts: &RenderOptions) -> Result<RenderedPage, RenderError> {
            tokio::time::timeout(opts.timeout(), self.load(url, opts))
                .await
                .map_err(|_| RenderError::Timeout(opts.timeout_ms))?
        }
    }
}
