//! Contribution intake and moderation
//!
//! Contributed documents start as `pending` and only become publicly listed
//! once a moderator approves them. Directly created and imported documents
//! never pass through here.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::{Contribution, Document, DocumentStatus, NewDocument, NewUser};
use crate::store::LibraryStore;

pub struct ModerationService {
    store: LibraryStore,
}

impl ModerationService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    /// Record a contribution as a pending document.
    ///
    /// The contributor is looked up by email and registered on first sight;
    /// a later contribution under the same email keeps the first stored name
    /// on the user record, while the document keeps the name as submitted.
    /// Folder counts are untouched until approval.
    pub async fn submit_contribution(&self, contribution: Contribution) -> Document {
        let config = self.store.config();
        let mut state = self.store.write().await;

        let user = match state.user_by_email(&contribution.uploader_email) {
            Some(user) => user.clone(),
            None => {
                let user = state.insert_user(NewUser::new(
                    contribution.uploader_name.clone(),
                    contribution.uploader_email.clone(),
                ));
                info!(user_id = user.id, "Registered contributor {}", user.email);
                user
            }
        };

        let placeholder = format!("{}{}", config.pending_ref_prefix, Uuid::new_v4());
        let new = NewDocument {
            title: contribution.title,
            description: contribution.description,
            file_name: contribution.file_name,
            file_size: contribution.file_size,
            page_count: contribution.page_count,
            mime_type: contribution.mime_type,
            external_ref: placeholder,
            download_url: None,
            folder_id: contribution.folder_id,
            is_favorite: false,
            uploaded_by: Some(user.id),
            uploader_name: Some(contribution.uploader_name),
        };
        let doc = state.insert_document(
            new,
            DocumentStatus::Pending,
            &config.default_mime_type,
            Utc::now(),
        );

        info!(
            document_id = doc.id,
            user_id = user.id,
            "Received contribution '{}'",
            doc.title
        );
        doc
    }

    /// Documents awaiting review
    pub async fn list_pending(&self) -> Vec<Document> {
        let state = self.store.read().await;
        state
            .documents()
            .filter(|d| d.status == DocumentStatus::Pending)
            .cloned()
            .collect()
    }

    /// Mark a document approved and recount its folder. The source status
    /// is not checked.
    pub async fn approve(&self, doc_id: i64, moderator_notes: Option<String>) -> Option<Document> {
        let mut state = self.store.write().await;
        let doc = state.document_mut(doc_id)?;
        doc.status = DocumentStatus::Approved;
        doc.moderator_notes = moderator_notes;
        let approved = doc.clone();

        if let Some(folder_id) = approved.folder_id {
            state.recount_folder(folder_id);
        }
        info!(document_id = doc_id, "Approved document '{}'", approved.title);
        Some(approved)
    }

    /// Mark a document rejected. Notes are stored as given; requiring them
    /// is the caller's job. Folder counts are never touched.
    pub async fn reject(&self, doc_id: i64, moderator_notes: String) -> Option<Document> {
        let mut state = self.store.write().await;
        let doc = state.document_mut(doc_id)?;
        doc.status = DocumentStatus::Rejected;
        doc.moderator_notes = Some(moderator_notes);
        info!(document_id = doc_id, "Rejected document '{}'", doc.title);
        Some(doc.clone())
    }
}
