//! URL-addressed cache key generation.

use md5::{Digest, Md5};

/// Compute the cache key for a crawl target.
///
/// The key is the MD5 digest of the URL bytes exactly as given, rendered as
/// 32 lowercase hex characters. No normalization is applied.
pub fn compute_cache_key(url: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}

/// File name under which the record for `url` is stored.
pub fn record_file_name(url: &str) -> String {
    format!("data_{}.json", compute_cache_key(url))
}
