//! Record store operations.
//!
//! Maps URLs to files in the output directory and reads/writes
//! `CrawlRecord` JSON.

use super::hash::record_file_name;
use super::record::CrawlRecord;
use crate::Error;
use std::path::{Path, PathBuf};

/// Directory-backed record cache.
///
/// A single process owns the directory at a time; no locking is done.
#[derive(Clone, Debug)]
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Open a store rooted at `dir`, creating the directory if it doesn't exist.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, Error> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!("record store opened at {}", dir.display());
        Ok(Self { dir })
    }

    /// Directory holding the record files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `url`. Deterministic across runs.
    pub fn key_for(&self, url: &str) -> PathBuf {
        self.dir.join(record_file_name(url))
    }

    /// Whether a record exists for `url`.
    pub async fn exists(&self, url: &str) -> bool {
        match tokio::fs::try_exists(self.key_for(url)).await {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!("could not check record for {}, treating as missing: {}", url, e);
                false
            }
        }
    }

    /// Read the record for `url`.
    ///
    /// Returns `Error::NotFound` if no record has been written for it.
    pub async fn read(&self, url: &str) -> Result<CrawlRecord, Error> {
        let path = self.key_for(url);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(Error::NotFound(url.to_string())),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write `record`, replacing any existing record for the same URL.
    pub async fn write(&self, record: &CrawlRecord) -> Result<PathBuf, Error> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let path = self.key_for(&record.url);
        let json = serde_json::to_string_pretty(record)?;
        tokio::fs::write(&path, json.as_bytes()).await?;

        tracing::debug!("wrote record for {} to {}", record.url, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_record(url: &str, filtered: &str) -> CrawlRecord {
        CrawlRecord::new(url, Utc::now(), format!("# Raw\n\n{filtered}"), filtered.to_string())
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("ai_training_data");

        let store = RecordStore::open(&dir).await.unwrap();
        assert!(dir.is_dir());
        assert_eq!(store.dir(), dir.as_path());
    }

    #[tokio::test]
    async fn test_key_for_is_stable() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();
        let reopened = RecordStore::open(tmp.path()).await.unwrap();

        assert_eq!(store.key_for("https://example.com/a"), reopened.key_for("https://example.com/a"));
        assert_ne!(store.key_for("https://example.com/a"), store.key_for("https://example.com/b"));
        assert!(store.key_for("https://example.com/a").starts_with(tmp.path()));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();

        assert!(!store.exists("https://example.com").await);
        let result = store.read("https://example.com").await;
        assert!(matches!(result, Err(Error::NotFound(url)) if url == "https://example.com"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();
        let record = make_record("https://example.com", "Some text. More text.");

        let path = store.write(&record).await.unwrap();
        assert_eq!(path, store.key_for("https://example.com"));
        assert!(store.exists("https://example.com").await);

        let read = store.read("https://example.com").await.unwrap();
        assert_eq!(read, record);
    }

    #[tokio::test]
    async fn test_write_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();

        store.write(&make_record("https://example.com", "first")).await.unwrap();
        store.write(&make_record("https://example.com", "second")).await.unwrap();

        let read = store.read("https://example.com").await.unwrap();
        assert_eq!(read.content.filtered_markdown, "second");
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_write_preserves_non_ascii_and_indents() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();
        let record = make_record("https://sk.wikipedia.org/wiki/Vojna", "Prvá svetová vojna.");

        let path = store.write(&record).await.unwrap();
        let text = std::fs::read_to_string(path).unwrap();

        assert!(text.contains("Prvá svetová vojna."));
        assert!(!text.contains("\\u"));
        assert!(text.contains("\n  \"url\": "));
    }

    #[tokio::test]
    async fn test_write_recreates_removed_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let store = RecordStore::open(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();

        store.write(&make_record("https://example.com", "text")).await.unwrap();
        assert!(store.exists("https://example.com").await);
    }

    #[tokio::test]
    async fn test_exists_unreadable_path_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("out");
        let store = RecordStore::open(&dir).await.unwrap();
        std::fs::remove_dir(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        assert!(!store.exists("https://example.com").await);
    }

    #[tokio::test]
    async fn test_read_malformed_record() {
        let tmp = tempfile::tempdir().unwrap();
        let store = RecordStore::open(tmp.path()).await.unwrap();
        std::fs::write(store.key_for("https://example.com"), "{\"url\": 1").unwrap();

        let result = store.read("https://example.com").await;
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
