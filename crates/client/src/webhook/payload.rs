//! Batch payload assembly from a directory of JSON records.

use super::error::WebhookError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Body POSTed to the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    pub data: Vec<Value>,
    pub metadata: PayloadMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadMetadata {
    /// JSON files found in the directory, parsed or not.
    pub total_files: usize,
    /// Files that parsed and were included in `data`.
    pub total_items: usize,
}

impl Payload {
    pub fn new(data: Vec<Value>, total_files: usize) -> Self {
        let total_items = data.len();
        Self { data, metadata: PayloadMetadata { total_files, total_items } }
    }
}

/// List `*.json` files directly inside `dir`, sorted by name.
///
/// Hidden files are skipped. Fails if `dir` is not an existing directory.
pub async fn json_files(dir: &Path) -> Result<Vec<PathBuf>, WebhookError> {
    match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(WebhookError::Directory(dir.to_path_buf())),
    }

    let read_err = |source: std::io::Error| WebhookError::ReadDir { path: dir.to_path_buf(), source };
    let mut entries = tokio::fs::read_dir(dir).await.map_err(read_err)?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(read_err)? {
        let path = entry.path();
        let visible = !entry.file_name().to_string_lossy().starts_with('.');
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if visible && is_json && tokio::fs::metadata(&path).await.is_ok_and(|m| m.is_file()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Build the payload from every JSON file in `dir`.
///
/// Returns `Ok(None)` when the directory holds no JSON files. Files that
/// fail to read or parse are logged and left out of `data`, but still
/// counted in `total_files`.
pub async fn collect_payload(dir: &Path) -> Result<Option<Payload>, WebhookError> {
    let files = json_files(dir).await?;
    if files.is_empty() {
        return Ok(None);
    }

    let mut data = Vec::with_capacity(files.len());
    for file in &files {
        match read_json(file).await {
            Ok(value) => data.push(value),
            Err(e) => tracing::warn!("error reading file {}: {}", file.display(), e),
        }
    }

    Ok(Some(Payload::new(data, files.len())))
}

async fn read_json(path: &Path) -> Result<Value, crawlmark_core::Error> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
