//! Cache-aware crawl orchestration.
//!
//! For each URL the crawler ends in one of three states:
//!
//! - **Cached**: a record already exists and no fresh crawl was requested
//! - **Fetched**: the page was rendered, converted, scored and persisted
//! - **Failed**: anything went wrong; the error is logged and the batch moves on
//!
//! URLs are processed strictly one after another, with a fixed pause before
//! every page fetch. Nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crawlmark_core::sanitize::strip_sections_markdown;
use crawlmark_core::{AppConfig, CrawlRecord, Error, RecordStore, SectionFilter};

use crate::extract::{ExtractConfig, GeneratedMarkdown, MarkdownGenerator, prune_html};
use crate::render::{RenderOptions, Renderer, parse_target};

/// Knobs for a crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Pause before every page fetch (default: 2s).
    pub request_delay: Duration,
    pub render: RenderOptions,
    pub extract: ExtractConfig,
    /// Tags dropped from the rendered HTML before conversion.
    pub excluded_tags: Vec<String>,
    /// Sections stripped from both the HTML and the generated markdown.
    pub section_filters: Vec<SectionFilter>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl CrawlOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            request_delay: config.request_delay(),
            render: RenderOptions { timeout_ms: config.render_timeout_ms, ..Default::default() },
            extract: ExtractConfig {
                char_threshold: Some(config.char_threshold),
                max_top_candidates: Some(config.max_top_candidates),
            },
            excluded_tags: config.excluded_tags.clone(),
            section_filters: config.section_filters(),
        }
    }
}

/// Terminal state of crawling one URL.
#[derive(Debug)]
pub enum CrawlOutcome {
    Cached(CrawlRecord),
    Fetched(CrawlRecord),
    Failed(Error),
}

impl CrawlOutcome {
    pub fn record(&self) -> Option<&CrawlRecord> {
        match self {
            CrawlOutcome::Cached(record) | CrawlOutcome::Fetched(record) => Some(record),
            CrawlOutcome::Failed(_) => None,
        }
    }

    pub fn into_record(self) -> Option<CrawlRecord> {
        match self {
            CrawlOutcome::Cached(record) | CrawlOutcome::Fetched(record) => Some(record),
            CrawlOutcome::Failed(_) => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrawlOutcome::Cached(_) => "cached",
            CrawlOutcome::Fetched(_) => "fetched",
            CrawlOutcome::Failed(_) => "failed",
        }
    }
}

/// Sequential crawler backed by a `RecordStore`.
pub struct Crawler {
    store: RecordStore,
    renderer: Arc<dyn Renderer>,
    generator: Arc<dyn MarkdownGenerator>,
    options: CrawlOptions,
}

impl Crawler {
    pub fn new(
        store: RecordStore, renderer: Arc<dyn Renderer>, generator: Arc<dyn MarkdownGenerator>, options: CrawlOptions,
    ) -> Self {
        Self { store, renderer, generator, options }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Crawl one URL, consulting the cache unless `force` is set.
    ///
    /// A cached record that can't be read is logged and crawled again.
    pub async fn crawl(&self, url: &str, force: bool) -> CrawlOutcome {
        if !force && self.store.exists(url).await {
            match self.store.read(url).await {
                Ok(record) => {
                    tracing::debug!("cache hit for {}", url);
                    return CrawlOutcome::Cached(record);
                }
                Err(e) => tracing::warn!("cached record for {} unreadable, crawling again: {}", url, e),
            }
        }

        match self.fetch(url).await {
            Ok(record) => CrawlOutcome::Fetched(record),
            Err(e) => {
                tracing::error!(code = e.code(), "error crawling {}: {}", url, e);
                CrawlOutcome::Failed(e)
            }
        }
    }

    /// Crawl `urls` in order, returning every outcome.
    pub async fn crawl_outcomes(&self, urls: &[String], force: bool) -> Vec<(String, CrawlOutcome)> {
        let mut outcomes = Vec::with_capacity(urls.len());
        for url in urls {
            let outcome = self.crawl(url, force).await;
            outcomes.push((url.clone(), outcome));
        }
        outcomes
    }

    /// Crawl `urls` in order, returning the records of the URLs that succeeded.
    pub async fn crawl_all(&self, urls: &[String], force: bool) -> Vec<CrawlRecord> {
        self.crawl_outcomes(urls, force)
            .await
            .into_iter()
            .filter_map(|(_, outcome)| outcome.into_record())
            .collect()
    }

    /// Prune `html`, generate both markdown variants and strip filtered sections from them.
    pub fn to_markdown(&self, html: &str) -> Result<GeneratedMarkdown, Error> {
        let filters = &self.options.section_filters;
        let pruned = prune_html(html, &self.options.excluded_tags, filters);
        let generated = self.generator.generate(&pruned, &self.options.extract)?;

        Ok(GeneratedMarkdown {
            raw_markdown: strip_sections_markdown(&generated.raw_markdown, filters),
            fit_markdown: strip_sections_markdown(&generated.fit_markdown, filters),
        })
    }

    async fn fetch(&self, url: &str) -> Result<CrawlRecord, Error> {
        let target = parse_target(url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        if !self.options.request_delay.is_zero() {
            tokio::time::sleep(self.options.request_delay).await;
        }

        let page = self.renderer.render(&target, &self.options.render).await?;
        tracing::debug!("rendered {} -> {} in {}ms", url, page.final_url, page.render_time_ms);

        let crawled_at = Utc::now();
        let markdown = self.to_markdown(&page.html)?;
        let record = CrawlRecord::new(url, crawled_at, markdown.raw_markdown, markdown.fit_markdown);

        let path = self.store.write(&record).await?;
        tracing::info!(
            url,
            length = record.metadata.length,
            quality_score = record.metadata.quality_score,
            "saved {}",
            path.display()
        );

        Ok(record)
    }
}
