//! Folder service

use std::collections::{HashMap, HashSet};

use tracing::info;

use crate::error::{LibraryError, LibraryResult};
use crate::models::{Folder, FolderTreeNode, NewFolder};
use crate::store::LibraryStore;

pub struct FolderService {
    store: LibraryStore,
}

impl FolderService {
    pub fn new(store: LibraryStore) -> Self {
        Self { store }
    }

    /// All folders, ordered by id
    pub async fn list(&self) -> Vec<Folder> {
        self.store.read().await.folders().cloned().collect()
    }

    pub async fn get(&self, folder_id: i64) -> Option<Folder> {
        self.store.read().await.folder(folder_id).cloned()
    }

    /// Create a folder with a fresh id and a zero document count.
    ///
    /// A dangling `parent_id` is accepted unless `strict_folder_parents` is
    /// configured. A new folder can never close a cycle since nothing
    /// references its id yet.
    pub async fn create(&self, new: NewFolder) -> LibraryResult<Folder> {
        let mut state = self.store.write().await;

        if let Some(parent_id) = new.parent_id {
            if self.store.config().strict_folder_parents && state.folder(parent_id).is_none() {
                return Err(LibraryError::ParentFolderNotFound(parent_id));
            }
        }

        let folder = state.insert_folder(new);
        info!(
            folder_id = folder.id,
            parent_id = ?folder.parent_id,
            "Created folder '{}'",
            folder.name
        );
        Ok(folder)
    }

    /// Overwrite the cached document count. No-op for unknown folders.
    pub async fn set_document_count(&self, folder_id: i64, count: u64) {
        self.store
            .write()
            .await
            .set_folder_document_count(folder_id, count);
    }

    /// Nested view of all folders. Folders without a parent, or whose parent
    /// does not exist, are roots.
    pub async fn tree(&self) -> Vec<FolderTreeNode> {
        let folders = self.list().await;
        build_tree(&folders)
    }
}

fn build_tree(folders: &[Folder]) -> Vec<FolderTreeNode> {
    let known: HashSet<i64> = folders.iter().map(|f| f.id).collect();
    let mut children: HashMap<Option<i64>, Vec<&Folder>> = HashMap::new();
    for folder in folders {
        let parent = folder.parent_id.filter(|p| known.contains(p));
        children.entry(parent).or_default().push(folder);
    }

    fn build(
        parent: Option<i64>,
        children: &HashMap<Option<i64>, Vec<&Folder>>,
    ) -> Vec<FolderTreeNode> {
        children
            .get(&parent)
            .map(|list| {
                list.iter()
                    .map(|f| FolderTreeNode {
                        id: f.id,
                        name: f.name.clone(),
                        parent_id: f.parent_id,
                        document_count: f.document_count,
                        children: build(Some(f.id), children),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    build(None, &children)
}
