//! Import of externally hosted files as approved documents

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{LibraryError, LibraryResult};
use crate::models::Document;
use crate::services::document_service::insert_approved;
use crate::source::{DriveFile, ExternalSource};
use crate::store::LibraryStore;

/// Outcome of an import run
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub imported: Vec<Document>,
    /// External ids left out: already in the library, or not a document
    /// of the library's MIME type
    pub skipped: Vec<String>,
}

pub struct ImportService {
    store: LibraryStore,
}

impl ImportService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    /// List files from `source` and import the new ones.
    ///
    /// With a target folder, only files under that folder's external
    /// reference are listed, and imported documents are filed there.
    pub async fn import_from(
        &self,
        source: &dyn ExternalSource,
        folder_id: Option<i64>,
    ) -> LibraryResult<ImportReport> {
        let folder_ref = match folder_id {
            Some(id) => {
                let state = self.store.read().await;
                let folder = state.folder(id).ok_or(LibraryError::FolderNotFound(id))?;
                folder.external_ref.clone()
            }
            None => None,
        };

        // The lock is not held while the source is queried.
        let files = source
            .list_files(folder_ref.as_deref())
            .await
            .map_err(|e| LibraryError::ExternalSource(format!("{:#}", e)))?;

        Ok(self.import_files(&files, folder_id).await)
    }

    /// Import files as approved documents. Files whose MIME type is not the
    /// library's document type, or whose id is already used as an external
    /// reference, are skipped.
    pub async fn import_files(&self, files: &[DriveFile], folder_id: Option<i64>) -> ImportReport {
        let default_mime = self.store.config().default_mime_type.clone();
        let mut state = self.store.write().await;
        let mut report = ImportReport::default();

        for file in files {
            let new = file.to_new_document(folder_id);
            if new.mime_type.as_deref() != Some(default_mime.as_str()) {
                debug!("Skipping external file {} of type {:?}", file.id, new.mime_type);
                report.skipped.push(file.id.clone());
                continue;
            }
            if state.document_by_external_ref(&file.id).is_some() {
                report.skipped.push(file.id.clone());
                continue;
            }
            match insert_approved(&mut state, new, &default_mime) {
                Ok(doc) => report.imported.push(doc),
                Err(e) => {
                    warn!("Skipping external file {}: {}", file.id, e);
                    report.skipped.push(file.id.clone());
                }
            }
        }

        info!(
            imported = report.imported.len(),
            skipped = report.skipped.len(),
            folder_id = ?folder_id,
            "External import finished"
        );
        report
    }
}
