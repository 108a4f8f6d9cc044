//! `crawlmark crawl`: render pages into the record store.

use std::path::Path;

use anyhow::{Context, Result, bail};
use crawlmark_client::CrawlOutcome;
use crawlmark_core::AppConfig;

use super::{EXIT_FAILURE, load_config};
use crate::cli::CrawlArgs;

/// Per-batch tallies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub fetched: usize,
    pub cached: usize,
    pub failed: usize,
}

impl Summary {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a CrawlOutcome>) -> Self {
        outcomes.into_iter().fold(Self::default(), |mut summary, outcome| {
            match outcome {
                CrawlOutcome::Fetched(_) => summary.fetched += 1,
                CrawlOutcome::Cached(_) => summary.cached += 1,
                CrawlOutcome::Failed(_) => summary.failed += 1,
            }
            summary
        })
    }

    pub fn succeeded(&self) -> usize {
        self.fetched + self.cached
    }
}

pub async fn run(args: CrawlArgs) -> u8 {
    let Some(mut config) = load_config() else {
        return EXIT_FAILURE;
    };
    if let Some(dir) = args.output_dir.clone() {
        config.output_dir = dir;
    }

    match execute(&args, &config).await {
        Ok(summary) => {
            tracing::info!(
                "crawl finished: {} succeeded ({} fetched, {} cached), {} failed",
                summary.succeeded(),
                summary.fetched,
                summary.cached,
                summary.failed
            );
            0
        }
        Err(e) => {
            tracing::error!("{e:#}");
            EXIT_FAILURE
        }
    }
}

/// URLs from the positional arguments followed by those in `--input`.
pub async fn collect_urls(args: &CrawlArgs) -> Result<Vec<String>> {
    let mut urls: Vec<String> = args.urls.iter().map(|u| u.trim().to_string()).filter(|u| !u.is_empty()).collect();

    if let Some(path) = &args.input {
        urls.extend(read_url_file(path).await?);
    }

    Ok(urls)
}

async fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read URL list '{}'", path.display()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

#[cfg(feature = "render")]
async fn execute(args: &CrawlArgs, config: &AppConfig) -> Result<Summary> {
    use std::sync::Arc;

    use crawlmark_client::{CrawlOptions, Crawler, HeadlessRenderer, LectitoGenerator};
    use crawlmark_core::RecordStore;

    let urls = collect_urls(args).await?;
    if urls.is_empty() {
        bail!("no URLs given; pass them as arguments or with --input");
    }

    let store = RecordStore::open(&config.output_dir)
        .await
        .with_context(|| format!("failed to open record store '{}'", config.output_dir.display()))?;

    let renderer = Arc::new(
        HeadlessRenderer::new(&config.user_agent)
            .await
            .context("failed to launch headless browser")?,
    );

    tracing::info!("crawling {} URLs into '{}'", urls.len(), store.dir().display());
    let crawler = Crawler::new(
        store,
        renderer.clone(),
        Arc::new(LectitoGenerator::new()),
        CrawlOptions::from_config(config),
    );
    let outcomes = crawler.crawl_outcomes(&urls, args.force).await;
    drop(crawler);

    if let Ok(renderer) = Arc::try_unwrap(renderer) {
        renderer.close().await;
    }

    for (url, outcome) in &outcomes {
        tracing::debug!("{}: {}", url, outcome.label());
    }

    Ok(Summary::from_outcomes(outcomes.iter().map(|(_, outcome)| outcome)))
}

#[cfg(not(feature = "render"))]
async fn execute(args: &CrawlArgs, _config: &AppConfig) -> Result<Summary> {
    if collect_urls(args).await?.is_empty() {
        bail!("no URLs given; pass them as arguments or with --input");
    }
    bail!("crawlmark was built without the `render` feature; no browser is available")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crawlmark_core::{CrawlRecord, Error};

    fn args(urls: &[&str], input: Option<std::path::PathBuf>) -> CrawlArgs {
        CrawlArgs { urls: urls.iter().map(|u| u.to_string()).collect(), input, force: false, output_dir: None }
    }

    fn record(url: &str) -> CrawlRecord {
        CrawlRecord::new(url, chrono::Utc::now(), "# Raw".into(), "Fit.".into())
    }

    #[tokio::test]
    async fn test_collect_urls_from_args_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("urls.txt");
        std::fs::write(&list, "# seed list\nhttps://example.com/b\n\n  https://example.com/c  \n").unwrap();

        let urls = collect_urls(&args(&["https://example.com/a", "  "], Some(list))).await.unwrap();
        assert_eq!(urls, vec!["https://example.com/a", "https://example.com/b", "https://example.com/c"]);
    }

    #[tokio::test]
    async fn test_collect_urls_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let result = collect_urls(&args(&[], Some(tmp.path().join("missing.txt")))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_execute_without_urls_fails() {
        let config = AppConfig::default();
        let result = execute(&args(&[], None), &config).await;
        assert!(result.unwrap_err().to_string().contains("no URLs given"));
    }

    #[test]
    fn test_summary_counts() {
        let outcomes = [
            CrawlOutcome::Fetched(record("https://example.com/a")),
            CrawlOutcome::Failed(Error::InvalidUrl("bad".into())),
            CrawlOutcome::Cached(record("https://example.com/c")),
            CrawlOutcome::Fetched(record("https://example.com/d")),
        ];

        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(summary, Summary { fetched: 2, cached: 1, failed: 1 });
        assert_eq!(summary.succeeded(), 3);
    }
}
