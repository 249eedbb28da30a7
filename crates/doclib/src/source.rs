//! External content sources
//!
//! An external source (Google Drive in production) lists files that can be
//! imported into the library as approved documents. The library only keeps
//! the file id and retrieval links; content is never fetched.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::NewDocument;

/// File metadata as reported by the Drive files API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    /// Size in bytes, encoded as a decimal string by the API
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub web_view_link: Option<String>,
    #[serde(default)]
    pub web_content_link: Option<String>,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl DriveFile {
    /// Map this file to creation fields for an approved document
    pub fn to_new_document(&self, folder_id: Option<i64>) -> NewDocument {
        let title = self
            .name
            .strip_suffix(".pdf")
            .unwrap_or(&self.name)
            .to_string();
        let mime_type = if self.mime_type.is_empty() {
            mime_guess::from_path(&self.name)
                .first_raw()
                .map(str::to_string)
        } else {
            Some(self.mime_type.clone())
        };

        NewDocument {
            title,
            description: Some(format!("Tài liệu từ Google Drive - {}", self.name)),
            file_name: self.name.clone(),
            file_size: self
                .size
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
            page_count: None,
            mime_type,
            external_ref: self.id.clone(),
            download_url: Some(
                self.web_content_link
                    .clone()
                    .unwrap_or_else(|| direct_download_url(&self.id)),
            ),
            folder_id,
            is_favorite: false,
            uploaded_by: None,
            uploader_name: None,
        }
    }
}

/// Direct download link for a Drive file id
pub fn direct_download_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?id={}&export=download", file_id)
}

/// A provider of importable files
#[async_trait]
pub trait ExternalSource: Send + Sync {
    /// Files in the given source folder, or in the whole source when `None`
    async fn list_files(&self, folder_ref: Option<&str>) -> Result<Vec<DriveFile>>;
}

/// Source backed by a fixed list of files, e.g. an exported Drive listing
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: Vec<DriveFile>,
}

impl StaticSource {
    pub fn new(files: Vec<DriveFile>) -> Self {
        Self { files }
    }

    /// Load a JSON array of Drive files
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file listing: {}", path.display()))?;
        let files: Vec<DriveFile> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse file listing: {}", path.display()))?;
        Ok(Self::new(files))
    }
}

#[async_trait]
impl ExternalSource for StaticSource {
    async fn list_files(&self, folder_ref: Option<&str>) -> Result<Vec<DriveFile>> {
        Ok(self
            .files
            .iter()
            .filter(|f| folder_ref.map_or(true, |r| f.parents.iter().any(|p| p == r)))
            .cloned()
            .collect())
    }
}
