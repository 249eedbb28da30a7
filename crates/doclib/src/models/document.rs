//! Library document model
//!
//! Documents reference their file content through an external reference and
//! a retrieval URL; the binary itself never passes through the library.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Moderation status of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Pending => write!(f, "pending"),
            DocumentStatus::Approved => write!(f, "approved"),
            DocumentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DocumentStatus::Pending),
            "approved" => Ok(DocumentStatus::Approved),
            "rejected" => Ok(DocumentStatus::Rejected),
            _ => Err(format!("Invalid document status: {}", s)),
        }
    }
}

/// Library document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub file_name: String,
    /// Size in bytes
    pub file_size: u64,
    pub page_count: Option<u32>,
    pub mime_type: String,
    /// Unique key of the file in the external content source
    #[serde(rename = "googleDriveId")]
    pub external_ref: String,
    /// None until the file is hosted externally
    pub download_url: Option<String>,
    pub folder_id: Option<i64>,
    pub is_favorite: bool,
    pub download_count: u64,
    pub uploaded_by: Option<i64>,
    /// Uploader display name at submission time
    pub uploader_name: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
    pub moderator_notes: Option<String>,
}

impl Document {
    pub fn is_approved(&self) -> bool {
        self.status == DocumentStatus::Approved
    }

    /// Case-insensitive substring match against title or description.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

/// Fields for a directly created (pre-approved) document
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    pub file_size: u64,
    pub page_count: Option<u32>,
    pub mime_type: Option<String>,
    #[serde(rename = "googleDriveId")]
    #[validate(length(min = 1, message = "External reference is required"))]
    pub external_ref: String,
    pub download_url: Option<String>,
    pub folder_id: Option<i64>,
    #[serde(default)]
    pub is_favorite: bool,
    pub uploaded_by: Option<i64>,
    pub uploader_name: Option<String>,
}

impl NewDocument {
    pub fn new(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        external_ref: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            file_size,
            external_ref: external_ref.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }

    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = Some(page_count);
        self
    }

    pub fn with_download_url(mut self, url: impl Into<String>) -> Self {
        self.download_url = Some(url.into());
        self
    }

    pub fn with_uploader_name(mut self, name: impl Into<String>) -> Self {
        self.uploader_name = Some(name.into());
        self
    }
}

/// Partial update of a document. Absent fields keep their value; for
/// nullable fields an explicit `null` clears the value. Required fields
/// that are present must be non-empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: Option<String>,
    pub file_size: Option<u64>,
    #[serde(default, deserialize_with = "present")]
    pub page_count: Option<Option<u32>>,
    pub mime_type: Option<String>,
    #[serde(rename = "googleDriveId")]
    #[validate(length(min = 1, message = "External reference is required"))]
    pub external_ref: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub download_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub folder_id: Option<Option<i64>>,
    pub is_favorite: Option<bool>,
    pub download_count: Option<u64>,
    #[serde(default, deserialize_with = "present")]
    pub uploaded_by: Option<Option<i64>>,
    #[serde(default, deserialize_with = "present")]
    pub uploader_name: Option<Option<String>>,
    pub status: Option<DocumentStatus>,
    #[serde(default, deserialize_with = "present")]
    pub moderator_notes: Option<Option<String>>,
}

/// Marks a field as present, so `null` becomes `Some(None)` instead of `None`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl DocumentPatch {
    /// Shallow-merge this patch into `doc`
    pub(crate) fn apply(self, doc: &mut Document) {
        if let Some(v) = self.title {
            doc.title = v;
        }
        if let Some(v) = self.description {
            doc.description = v;
        }
        if let Some(v) = self.file_name {
            doc.file_name = v;
        }
        if let Some(v) = self.file_size {
            doc.file_size = v;
        }
        if let Some(v) = self.page_count {
            doc.page_count = v;
        }
        if let Some(v) = self.mime_type {
            doc.mime_type = v;
        }
        if let Some(v) = self.external_ref {
            doc.external_ref = v;
        }
        if let Some(v) = self.download_url {
            doc.download_url = v;
        }
        if let Some(v) = self.folder_id {
            doc.folder_id = v;
        }
        if let Some(v) = self.is_favorite {
            doc.is_favorite = v;
        }
        if let Some(v) = self.download_count {
            doc.download_count = v;
        }
        if let Some(v) = self.uploaded_by {
            doc.uploaded_by = v;
        }
        if let Some(v) = self.uploader_name {
            doc.uploader_name = v;
        }
        if let Some(v) = self.status {
            doc.status = v;
        }
        if let Some(v) = self.moderator_notes {
            doc.moderator_notes = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_and_parse() {
        assert_eq!(DocumentStatus::Pending.to_string(), "pending");
        assert_eq!(
            "Approved".parse::<DocumentStatus>().unwrap(),
            DocumentStatus::Approved
        );
        assert!("archived".parse::<DocumentStatus>().is_err());
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: DocumentPatch =
            serde_json::from_str(r#"{"description": null, "title": "New"}"#).unwrap();
        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert_eq!(patch.folder_id, None);
    }

    #[test]
    fn test_patch_validation() {
        assert!(DocumentPatch::default().validate().is_ok());

        let cleared: DocumentPatch = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert!(cleared.validate().is_ok());

        let empty_title: DocumentPatch = serde_json::from_str(r#"{"title": ""}"#).unwrap();
        assert!(empty_title.validate().is_err());

        let empty_ref: DocumentPatch = serde_json::from_str(r#"{"googleDriveId": ""}"#).unwrap();
        assert!(empty_ref.validate().is_err());
    }

    #[test]
    fn test_new_document_field_names() {
        let doc: NewDocument = serde_json::from_str(
            r#"{"title":"T","fileName":"t.pdf","fileSize":10,"googleDriveId":"abc","folderId":2}"#,
        )
        .unwrap();
        assert_eq!(doc.external_ref, "abc");
        assert_eq!(doc.folder_id, Some(2));
        assert!(!doc.is_favorite);
        assert!(doc.mime_type.is_none());
    }
}
