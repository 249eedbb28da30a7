//! Document library core
//!
//! This crate provides the in-memory storage and moderation engine behind
//! the document library: folders organized as a tree, PDF documents filed
//! into them, and a lightweight user registry used to attribute community
//! contributions.
//!
//! # Features
//! - Folder and document CRUD with cached per-folder approved counts
//! - Case-insensitive search over titles and descriptions
//! - Contribution intake with a pending/approved/rejected moderation workflow
//! - Import of files listed by an external content source (e.g. Google Drive)
//! - An axum router exposing the library over HTTP

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod source;
pub mod store;

pub use config::LibraryConfig;
pub use error::{LibraryError, LibraryResult};
pub use store::LibraryStore;
