//! Markdown generation from rendered HTML using Lectito.
//!
//! Produces two variants for every page:
//!
//! - **raw**: the whole document converted to markdown
//! - **fit**: only the readable main content, after Lectito's candidate
//!   scoring and pruning, converted to markdown
//!
//! The `MarkdownGenerator` trait keeps the crawler independent of the
//! extraction engine.

pub mod prune;

pub use prune::{prune_html, remove_tags, strip_section_html};

use crawlmark_core::Error;
use lectito_core::{Document, ExtractConfig as LectitoConfig};

/// Configuration for content pruning.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum character count for a content block (default: 200)
    pub char_threshold: Option<usize>,

    /// Maximum number of top candidates to consider (default: 5)
    pub max_top_candidates: Option<usize>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { char_threshold: Some(200), max_top_candidates: Some(5) }
    }
}

impl ExtractConfig {
    /// Convert to Lectito's config type.
    fn to_lectito_config(&self) -> LectitoConfig {
        let mut cfg = LectitoConfig::default();
        if let Some(threshold) = self.char_threshold {
            cfg.char_threshold = threshold;
        }
        if let Some(max) = self.max_top_candidates {
            cfg.max_top_candidates = max;
        }
        cfg
    }
}

/// Both markdown renderings of a page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneratedMarkdown {
    /// Whole document as markdown.
    pub raw_markdown: String,
    /// Readable content only; empty when no main content was found.
    pub fit_markdown: String,
}

/// Turns rendered HTML into raw and pruned markdown.
pub trait MarkdownGenerator: Send + Sync {
    fn generate(&self, html: &str, config: &ExtractConfig) -> Result<GeneratedMarkdown, Error>;
}

/// Lectito-based generator implementation.
#[derive(Debug, Default)]
pub struct LectitoGenerator;

impl LectitoGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownGenerator for LectitoGenerator {
    fn generate(&self, html: &str, config: &ExtractConfig) -> Result<GeneratedMarkdown, Error> {
        let doc = Document::parse(html).map_err(|e| Error::ExtractFailed(format!("failed to parse HTML: {}", e)))?;
        let metadata = doc.extract_metadata();

        let raw_markdown = lectito_core::convert_to_markdown(html, &metadata, &Default::default())
            .map_err(|e| Error::ExtractFailed(format!("markdown conversion failed: {}", e)))?;

        let fit_markdown = match lectito_core::extract_content(&doc, &config.to_lectito_config()) {
            Ok(extracted) => lectito_core::convert_to_markdown(&extracted.content, &metadata, &Default::default())
                .map_err(|e| Error::ExtractFailed(format!("markdown conversion failed: {}", e)))?,
            Err(e) => {
                tracing::warn!("no readable content found, filtered markdown left empty: {e}");
                String::new()
            }
        };

        Ok(GeneratedMarkdown { raw_markdown, fit_markdown })
    }
}
