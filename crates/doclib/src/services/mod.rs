//! Services module - business logic layer
//!
//! Every service wraps a cloned [`LibraryStore`](crate::store::LibraryStore)
//! handle and holds the store lock for the duration of a single operation.

pub mod document_service;
pub mod folder_service;
pub mod import_service;
pub mod moderation_service;
pub mod stats_service;
pub mod user_service;

pub use document_service::DocumentService;
pub use folder_service::FolderService;
pub use import_service::{ImportReport, ImportService};
pub use moderation_service::ModerationService;
pub use stats_service::StatsService;
pub use user_service::UserService;
