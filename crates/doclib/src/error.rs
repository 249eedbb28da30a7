//! Error types for the library

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Library error types
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Folder not found: {0}")]
    FolderNotFound(i64),

    #[error("Document not found: {0}")]
    DocumentNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Parent folder not found: {0}")]
    ParentFolderNotFound(i64),

    #[error("A document already references external file: {external_ref}")]
    ExternalRefConflict { external_ref: String },

    #[error("A user with this email already exists: {email}")]
    EmailConflict { email: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("External source error: {0}")]
    ExternalSource(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for LibraryError {
    fn from(err: validator::ValidationErrors) -> Self {
        LibraryError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::Internal(err.to_string())
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LibraryError {
    /// Convert to API error code
    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::FolderNotFound(_) => "FOLDER_NOT_FOUND",
            LibraryError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            LibraryError::UserNotFound(_) => "USER_NOT_FOUND",
            LibraryError::ParentFolderNotFound(_) => "PARENT_FOLDER_NOT_FOUND",
            LibraryError::ExternalRefConflict { .. } | LibraryError::EmailConflict { .. } => {
                "CONFLICT"
            }
            LibraryError::Validation(_) => "VALIDATION_ERROR",
            LibraryError::ExternalSource(_) => "EXTERNAL_SOURCE_ERROR",
            LibraryError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LibraryError::FolderNotFound(_)
            | LibraryError::DocumentNotFound(_)
            | LibraryError::UserNotFound(_) => StatusCode::NOT_FOUND,

            LibraryError::ExternalRefConflict { .. } | LibraryError::EmailConflict { .. } => {
                StatusCode::CONFLICT
            }

            LibraryError::Validation(_) | LibraryError::ParentFolderNotFound(_) => {
                StatusCode::BAD_REQUEST
            }

            LibraryError::ExternalSource(_) => StatusCode::BAD_GATEWAY,

            LibraryError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ApiError {
            code: self.code().to_string(),
            message: self.to_string(),
            details: None,
        };

        (status, axum::Json(body)).into_response()
    }
}
