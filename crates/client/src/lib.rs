//! Client code for crawlmark.
//!
//! This crate provides the crawl pipeline (headless rendering, pruning and
//! markdown generation) and the webhook forwarder used by the CLI.

pub mod crawl;
pub mod extract;
pub mod render;
pub mod webhook;

pub use crawl::{CrawlOptions, CrawlOutcome, Crawler};
pub use extract::{ExtractConfig, GeneratedMarkdown, LectitoGenerator, MarkdownGenerator, prune_html};
pub use render::{RenderError, RenderOptions, RenderedPage, Renderer, UrlError, parse_target};
pub use webhook::{ForwardReport, Payload, WebhookClient, WebhookConfig, WebhookError};

#[cfg(feature = "render")]
pub use render::HeadlessRenderer;
