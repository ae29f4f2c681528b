//! Attachment storage on the local filesystem.
//!
//! Files land under `<root>/<folder>/` and are served by the router at
//! `/media/<folder>/<name>`.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const MEDIA_URL_PREFIX: &str = "/media";

/// A file written by [`MediaStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Path relative to the media root, e.g. `minutes/0190…-agenda.pdf`.
    pub relative_path: String,
}

impl StoredFile {
    pub fn url(&self) -> String {
        media_url(&self.relative_path)
    }
}

/// URL a stored relative path is served from.
pub fn media_url(relative_path: &str) -> String {
    format!("{}/{}", MEDIA_URL_PREFIX, relative_path)
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` under `folder`, prefixing the sanitized original name with
    /// a fresh UUID so uploads never overwrite each other.
    pub async fn save(&self, folder: &str, original_name: &str, bytes: &[u8]) -> Result<StoredFile> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create media directory {}", dir.display()))?;

        let file_name = format!("{}-{}", Uuid::now_v7(), sanitize_file_name(original_name));
        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write attachment {}", path.display()))?;

        tracing::info!(path = %path.display(), size = bytes.len(), "Stored attachment");

        Ok(StoredFile {
            relative_path: format!("{}/{}", folder, file_name),
        })
    }
}

impl MediaStore {
    /// Delete a file written by [`MediaStore::save`].
    pub async fn remove(&self, relative_path: &str) -> Result<()> {
        let path = self.root.join(relative_path);
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to remove attachment {}", path.display()))?;

        tracing::info!(path = %path.display(), "Removed attachment");
        Ok(())
    }
}

/// Keep the final path component and replace anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim_start_matches('.');

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() {
        "attachment".to_string()
    } else {
        cleaned
    }
}
