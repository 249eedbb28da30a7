//! Folder model for document organization

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Library folder. Folders form a tree through `parent_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    /// Folder id in the external content source
    #[serde(rename = "googleDriveId")]
    pub external_ref: Option<String>,
    /// Cached number of approved documents filed directly in this folder
    pub document_count: u64,
}

/// Request to create a new folder
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFolder {
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    pub parent_id: Option<i64>,
    #[serde(rename = "googleDriveId")]
    pub external_ref: Option<String>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_external_ref(mut self, external_ref: impl Into<String>) -> Self {
        self.external_ref = Some(external_ref.into());
        self
    }
}

/// Folder tree node for hierarchical display
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderTreeNode {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
    pub document_count: u64,
    pub children: Vec<FolderTreeNode>,
}
