//! Core types and shared functionality for crawlmark.
//!
//! This crate provides:
//! - The `CrawlRecord` data model and its file-backed cache
//! - Quality scoring and markdown section stripping
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod sanitize;
pub mod score;

pub use cache::{CrawlRecord, RecordStore};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use sanitize::SectionFilter;
pub use score::quality_score;
