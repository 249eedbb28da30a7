//! Library-wide counters

use crate::models::{DocumentStatus, LibraryStats};
use crate::store::LibraryStore;

pub struct StatsService {
    store: LibraryStore,
}

impl StatsService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    /// Snapshot of document, folder and user totals taken under one read lock.
    /// Favorites and downloads only count approved documents.
    pub async fn stats(&self) -> LibraryStats {
        let state = self.store.read().await;
        let mut stats = LibraryStats {
            folders: state.folders().count() as u64,
            users: state.users().count() as u64,
            ..Default::default()
        };

        for doc in state.documents() {
            match doc.status {
                DocumentStatus::Approved => {
                    stats.approved_documents += 1;
                    stats.total_downloads += doc.download_count;
                    if doc.is_favorite {
                        stats.favorite_documents += 1;
                    }
                }
                DocumentStatus::Pending => stats.pending_documents += 1,
                DocumentStatus::Rejected => stats.rejected_documents += 1,
            }
        }
        stats
    }
}
