//! Community contribution and moderation requests

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Document;

/// A document submitted by a member of the public, pending review
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "File name is required"))]
    pub file_name: String,
    pub file_size: u64,
    pub page_count: Option<u32>,
    pub mime_type: Option<String>,
    pub folder_id: Option<i64>,
    #[validate(length(min = 1, message = "Uploader name is required"))]
    pub uploader_name: String,
    #[validate(email(message = "Invalid email"))]
    pub uploader_email: String,
}

impl Contribution {
    pub fn new(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        uploader_name: impl Into<String>,
        uploader_email: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            file_name: file_name.into(),
            file_size,
            uploader_name: uploader_name.into(),
            uploader_email: uploader_email.into(),
            ..Self::default()
        }
    }

    pub fn with_folder(mut self, folder_id: i64) -> Self {
        self.folder_id = Some(folder_id);
        self
    }
}

/// Moderator decision payload for approve/reject
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequest {
    pub moderator_notes: Option<String>,
}

/// Response wrapping a document with a user-facing message
#[derive(Debug, Clone, Serialize)]
pub struct DocumentMessage {
    pub message: String,
    pub document: Document,
}

impl DocumentMessage {
    pub fn new(message: impl Into<String>, document: Document) -> Self {
        Self {
            message: message.into(),
            document,
        }
    }
}
