//! Library configuration module

use serde::{Deserialize, Serialize};

/// Behavior switches for the library store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Whether to seed the default folders and sample documents at startup
    #[serde(default = "default_true")]
    pub seed_defaults: bool,

    /// Reject folders whose parent id does not exist
    #[serde(default)]
    pub strict_folder_parents: bool,

    /// Reject direct user creation with an email that is already registered
    #[serde(default)]
    pub unique_user_emails: bool,

    /// Recount folder totals when a patch changes a document's folder or status
    #[serde(default = "default_true")]
    pub recount_on_update: bool,

    /// MIME type assigned when a document is created without one
    #[serde(default = "default_mime_type")]
    pub default_mime_type: String,

    /// Prefix of the placeholder external reference given to contributions
    #[serde(default = "default_pending_ref_prefix")]
    pub pending_ref_prefix: String,
}

fn default_true() -> bool {
    true
}

fn default_mime_type() -> String {
    "application/pdf".to_string()
}

fn default_pending_ref_prefix() -> String {
    "pending_".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            strict_folder_parents: false,
            unique_user_emails: false,
            recount_on_update: true,
            default_mime_type: default_mime_type(),
            pending_ref_prefix: default_pending_ref_prefix(),
        }
    }
}

impl LibraryConfig {
    /// Config for an empty store, used by tests and embedders that inject
    /// their own initial state
    pub fn unseeded() -> Self {
        Self {
            seed_defaults: false,
            ..Self::default()
        }
    }
}
