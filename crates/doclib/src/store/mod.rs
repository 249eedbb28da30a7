//! In-memory library store
//!
//! `LibraryStore` is a cloneable handle over the shared state. Services take
//! the write lock once per operation, so every read-modify-write sequence
//! (counter increments, favorite toggles, folder recounts) is observed as a
//! single step by concurrent callers.

mod sequence;

pub use sequence::IdSequence;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::config::LibraryConfig;
use crate::models::{Document, DocumentStatus, Folder, NewDocument, NewFolder, NewUser, User};
use crate::seed::Seed;

/// Entity tables and id sequences. Maps are keyed by id, and ids are
/// allocated in insertion order, so iteration preserves insertion order.
#[derive(Debug, Default)]
pub struct StoreState {
    folders: BTreeMap<i64, Folder>,
    documents: BTreeMap<i64, Document>,
    users: BTreeMap<i64, User>,
    folder_ids: IdSequence,
    document_ids: IdSequence,
    user_ids: IdSequence,
}

impl StoreState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================
    // Folders
    // ========================================

    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    pub fn folder(&self, id: i64) -> Option<&Folder> {
        self.folders.get(&id)
    }

    pub fn insert_folder(&mut self, new: NewFolder) -> Folder {
        let folder = Folder {
            id: self.folder_ids.allocate(),
            name: new.name,
            parent_id: new.parent_id,
            external_ref: new.external_ref,
            document_count: 0,
        };
        self.folders.insert(folder.id, folder.clone());
        folder
    }

    /// Overwrite a folder's cached count. Unknown folders are ignored.
    pub fn set_folder_document_count(&mut self, folder_id: i64, count: u64) {
        if let Some(folder) = self.folders.get_mut(&folder_id) {
            folder.document_count = count;
        }
    }

    /// Number of approved documents filed directly in `folder_id`
    pub fn approved_count(&self, folder_id: i64) -> u64 {
        self.documents
            .values()
            .filter(|d| d.folder_id == Some(folder_id) && d.is_approved())
            .count() as u64
    }

    /// Recompute the cached approved count of one folder
    pub fn recount_folder(&mut self, folder_id: i64) {
        let count = self.approved_count(folder_id);
        self.set_folder_document_count(folder_id, count);
    }

    /// Recompute the cached count of every folder
    pub fn recount_all(&mut self) {
        let ids: Vec<i64> = self.folders.keys().copied().collect();
        for id in ids {
            self.recount_folder(id);
        }
    }

    // ========================================
    // Users
    // ========================================

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn user(&self, id: i64) -> Option<&User> {
        self.users.get(&id)
    }

    /// Exact, case-sensitive email match
    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|u| u.email == email)
    }

    pub fn insert_user(&mut self, new: NewUser) -> User {
        let user = User {
            id: self.user_ids.allocate(),
            name: new.name,
            email: new.email,
            created_at: Utc::now(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    // ========================================
    // Documents
    // ========================================

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn document(&self, id: i64) -> Option<&Document> {
        self.documents.get(&id)
    }

    pub fn document_mut(&mut self, id: i64) -> Option<&mut Document> {
        self.documents.get_mut(&id)
    }

    pub fn document_by_external_ref(&self, external_ref: &str) -> Option<&Document> {
        self.documents
            .values()
            .find(|d| d.external_ref == external_ref)
    }

    /// Build and store a document from creation fields, `download_url` taken
    /// as given. Does not recount; callers decide whether the new document
    /// affects folder totals.
    pub fn insert_document(
        &mut self,
        new: NewDocument,
        status: DocumentStatus,
        default_mime_type: &str,
        uploaded_at: DateTime<Utc>,
    ) -> Document {
        let document = Document {
            id: self.document_ids.allocate(),
            title: new.title,
            description: new.description,
            file_name: new.file_name,
            file_size: new.file_size,
            page_count: new.page_count,
            mime_type: new
                .mime_type
                .unwrap_or_else(|| default_mime_type.to_string()),
            external_ref: new.external_ref,
            download_url: new.download_url,
            folder_id: new.folder_id,
            is_favorite: new.is_favorite,
            download_count: 0,
            uploaded_by: new.uploaded_by,
            uploader_name: new.uploader_name,
            uploaded_at,
            status,
            moderator_notes: None,
        };
        self.documents.insert(document.id, document.clone());
        document
    }

    pub fn remove_document(&mut self, id: i64) -> Option<Document> {
        self.documents.remove(&id)
    }
}

/// Shared handle to the library state
#[derive(Clone)]
pub struct LibraryStore {
    state: Arc<RwLock<StoreState>>,
    config: Arc<LibraryConfig>,
}

impl LibraryStore {
    /// Create a store, seeding the default folders and sample documents
    /// when `config.seed_defaults` is set
    pub fn new(config: LibraryConfig) -> Self {
        let seed = if config.seed_defaults {
            Seed::defaults()
        } else {
            Seed::empty()
        };
        Self::with_seed(config, seed)
    }

    /// Create a store from an explicit initial state
    pub fn with_seed(config: LibraryConfig, seed: Seed) -> Self {
        let mut state = StoreState::new();
        let (folders, documents) = (seed.folders.len(), seed.documents.len());
        seed.apply(&mut state, &config.default_mime_type);
        if folders + documents > 0 {
            info!(folders, documents, "Seeded library store");
        }

        Self {
            state: Arc::new(RwLock::new(state)),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub(crate) async fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().await
    }

    pub(crate) async fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().await
    }
}

impl Default for LibraryStore {
    fn default() -> Self {
        Self::new(LibraryConfig::default())
    }
}
