//! Data models for the document library

mod contribution;
mod document;
mod folder;
mod user;

pub use contribution::*;
pub use document::*;
pub use folder::*;
pub use user::*;

/// Aggregate library statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub approved_documents: u64,
    pub pending_documents: u64,
    pub rejected_documents: u64,
    pub favorite_documents: u64,
    pub total_downloads: u64,
    pub folders: u64,
    pub users: u64,
}

/// Response for a download request
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub download_url: Option<String>,
}
