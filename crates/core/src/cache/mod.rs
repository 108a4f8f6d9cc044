//! File-backed cache of crawl records.
//!
//! Each crawled URL is stored as one pretty-printed JSON file whose name is
//! derived from an MD5 digest of the exact URL string:
//!
//! - Content-addressed by URL, not by crawl time (re-crawls overwrite)
//! - Human-readable, UTF-8 JSON with non-ASCII text left unescaped
//! - The output directory is created on first use

pub mod hash;
pub mod record;
pub mod store;

pub use crate::Error;

pub use hash::{compute_cache_key, record_file_name};
pub use record::{CrawlRecord, RecordContent, RecordMetadata};
pub use store::RecordStore;
