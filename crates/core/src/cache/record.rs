//! The persisted crawl record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::score::quality_score;

/// The result of crawling one URL, persisted as one JSON file.
///
/// Field order matches the on-disk layout consumed by the webhook forwarder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    /// ISO-8601 crawl time; not touched on cache hits.
    pub timestamp: String,
    pub content: RecordContent,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordContent {
    pub raw_markdown: String,
    pub filtered_markdown: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Character count of `filtered_markdown`.
    pub length: usize,
    pub quality_score: f64,
}

impl CrawlRecord {
    /// Assemble a record, deriving length and quality score from the filtered markdown.
    pub fn new(url: impl Into<String>, crawled_at: DateTime<Utc>, raw_markdown: String, filtered_markdown: String) -> Self {
        let metadata =
            RecordMetadata { length: filtered_markdown.chars().count(), quality_score: quality_score(&filtered_markdown) };

        Self {
            url: url.into(),
            timestamp: crawled_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            content: RecordContent { raw_markdown, filtered_markdown },
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-20T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_record_new_derives_metadata() {
        let filtered = "Prvá svetová vojna. Bola to vojna.".to_string();
        let record = CrawlRecord::new("https://example.com", fixed_time(), "# raw".into(), filtered.clone());

        assert_eq!(record.url, "https://example.com");
        assert_eq!(record.timestamp, "2025-01-20T08:30:00.000000Z");
        assert_eq!(record.metadata.length, filtered.chars().count());
        assert!(record.metadata.length < filtered.len());
        assert_eq!(record.metadata.quality_score, quality_score(&filtered));
    }

    #[test]
    fn test_record_json_shape() {
        let record = CrawlRecord::new("https://example.com", fixed_time(), "raw".into(), "filtered".into());
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["url"], "https://example.com");
        assert_eq!(value["content"]["raw_markdown"], "raw");
        assert_eq!(value["content"]["filtered_markdown"], "filtered");
        assert_eq!(value["metadata"]["length"], 8);
        assert_eq!(value["metadata"]["quality_score"], 0.0);
    }

    #[test]
    fn test_record_field_order() {
        let record = CrawlRecord::new("https://example.com", fixed_time(), "raw".into(), "filtered".into());
        let json = serde_json::to_string(&record).unwrap();

        let url = json.find("\"url\"").unwrap();
        let timestamp = json.find("\"timestamp\"").unwrap();
        let content = json.find("\"content\"").unwrap();
        let metadata = json.find("\"metadata\"").unwrap();
        assert!(url < timestamp && timestamp < content && content < metadata);
    }
}
