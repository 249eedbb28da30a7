//! Document service - storage, queries and counters
//!
//! Documents created here bypass moderation and are approved immediately.
//! Every mutation that can change which approved documents a folder holds
//! recounts the affected folders inside the same write lock.

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Document, DocumentPatch, DocumentStatus, DownloadResponse, NewDocument};
use crate::store::{LibraryStore, StoreState};

/// Document service for the library store
pub struct DocumentService {
    store: LibraryStore,
}

impl DocumentService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    // ========================================
    // Queries
    // ========================================

    pub async fn list_approved(&self) -> Vec<Document> {
        let state = self.store.read().await;
        state.documents().filter(|d| d.is_approved()).cloned().collect()
    }

    /// Approved documents filed directly in `folder_id` (no descent into
    /// child folders)
    pub async fn list_approved_by_folder(&self, folder_id: i64) -> Vec<Document> {
        let state = self.store.read().await;
        state
            .documents()
            .filter(|d| d.folder_id == Some(folder_id) && d.is_approved())
            .cloned()
            .collect()
    }

    pub async fn list_favorites(&self) -> Vec<Document> {
        let state = self.store.read().await;
        state
            .documents()
            .filter(|d| d.is_favorite && d.is_approved())
            .cloned()
            .collect()
    }

    /// Any document regardless of moderation status
    pub async fn get(&self, doc_id: i64) -> Option<Document> {
        self.store.read().await.document(doc_id).cloned()
    }

    pub async fn get_by_external_ref(&self, external_ref: &str) -> Option<Document> {
        self.store
            .read()
            .await
            .document_by_external_ref(external_ref)
            .cloned()
    }

    /// Case-insensitive substring search over title and description.
    /// Matches documents of every status, in insertion order.
    pub async fn search(&self, query: &str) -> Vec<Document> {
        let needle = query.to_lowercase();
        let state = self.store.read().await;
        let results: Vec<Document> = state
            .documents()
            .filter(|d| d.matches(&needle))
            .cloned()
            .collect();
        debug!(query, hits = results.len(), "Searched documents");
        results
    }

    // ========================================
    // Mutations
    // ========================================

    /// Create an approved document and recount its folder.
    /// Fails with a conflict if the external reference is already in use.
    pub async fn create(&self, new: NewDocument) -> LibraryResult<Document> {
        let mut state = self.store.write().await;
        let doc = insert_approved(&mut state, new, &self.store.config().default_mime_type)?;
        info!(
            document_id = doc.id,
            folder_id = ?doc.folder_id,
            "Created document '{}'",
            doc.title
        );
        Ok(doc)
    }

    /// Shallow-merge `patch` into a document. Returns `Ok(None)` when the
    /// document does not exist.
    pub async fn update(&self, doc_id: i64, patch: DocumentPatch) -> LibraryResult<Option<Document>> {
        let mut state = self.store.write().await;
        if state.document(doc_id).is_none() {
            return Ok(None);
        }

        if let Some(ref external_ref) = patch.external_ref {
            if let Some(other) = state.document_by_external_ref(external_ref) {
                if other.id != doc_id {
                    return Err(LibraryError::ExternalRefConflict {
                        external_ref: external_ref.clone(),
                    });
                }
            }
        }

        let Some(doc) = state.document_mut(doc_id) else {
            return Ok(None);
        };
        let (old_folder, old_status) = (doc.folder_id, doc.status);
        patch.apply(doc);
        let updated = doc.clone();

        let membership_changed = old_folder != updated.folder_id || old_status != updated.status;
        if membership_changed && self.store.config().recount_on_update {
            for folder_id in [old_folder, updated.folder_id].into_iter().flatten() {
                state.recount_folder(folder_id);
            }
        }

        debug!(document_id = doc_id, "Updated document");
        Ok(Some(updated))
    }

    /// Remove a document and recount its folder. Returns false when the
    /// document does not exist.
    pub async fn delete(&self, doc_id: i64) -> bool {
        let mut state = self.store.write().await;
        let Some(doc) = state.remove_document(doc_id) else {
            return false;
        };
        if let Some(folder_id) = doc.folder_id {
            state.recount_folder(folder_id);
        }
        info!(document_id = doc_id, "Deleted document '{}'", doc.title);
        true
    }

    /// Add one to the download counter. Returns false when the document does
    /// not exist.
    pub async fn increment_download_count(&self, doc_id: i64) -> bool {
        let mut state = self.store.write().await;
        match state.document_mut(doc_id) {
            Some(doc) => {
                doc.download_count += 1;
                true
            }
            None => false,
        }
    }

    /// Count a download and return the retrieval URL in one step
    pub async fn download(&self, doc_id: i64) -> Option<DownloadResponse> {
        let mut state = self.store.write().await;
        let doc = state.document_mut(doc_id)?;
        doc.download_count += 1;
        debug!(
            document_id = doc_id,
            downloads = doc.download_count,
            "Recorded download"
        );
        Some(DownloadResponse {
            download_url: doc.download_url.clone(),
        })
    }

    pub async fn toggle_favorite(&self, doc_id: i64) -> Option<Document> {
        let mut state = self.store.write().await;
        let doc = state.document_mut(doc_id)?;
        doc.is_favorite = !doc.is_favorite;
        Some(doc.clone())
    }
}

/// Insert an approved document with an empty retrieval URL default and
/// recount its folder. Shared by direct creation and external import.
pub(crate) fn insert_approved(
    state: &mut StoreState,
    mut new: NewDocument,
    default_mime_type: &str,
) -> LibraryResult<Document> {
    if state.document_by_external_ref(&new.external_ref).is_some() {
        return Err(LibraryError::ExternalRefConflict {
            external_ref: new.external_ref,
        });
    }

    new.download_url.get_or_insert_with(String::new);
    let doc = state.insert_document(new, DocumentStatus::Approved, default_mime_type, Utc::now());
    if let Some(folder_id) = doc.folder_id {
        state.recount_folder(folder_id);
    }
    Ok(doc)
}
