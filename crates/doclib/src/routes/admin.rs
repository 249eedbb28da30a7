//! Moderation routes

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    routing::{get, post},
    Json, Router,
};

use super::{optional_json, path_param, ApiState};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Document, DocumentMessage, ModerationRequest};
use crate::services::ModerationService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/admin/pending", get(list_pending))
        .route("/admin/approve/{id}", post(approve))
        .route("/admin/reject/{id}", post(reject))
        .with_state(state)
}

async fn list_pending(State(state): State<ApiState>) -> Json<Vec<Document>> {
    Json(ModerationService::new(state.store).list_pending().await)
}

/// The request body is optional; notes default to none
async fn approve(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> LibraryResult<Json<DocumentMessage>> {
    let id = path_param(path)?;
    let request: ModerationRequest = optional_json(&body)?;

    let document = ModerationService::new(state.store)
        .approve(id, request.moderator_notes)
        .await
        .ok_or(LibraryError::DocumentNotFound(id))?;
    Ok(Json(DocumentMessage::new("Tài liệu đã được duyệt", document)))
}

async fn reject(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> LibraryResult<Json<DocumentMessage>> {
    let id = path_param(path)?;
    let request: ModerationRequest = optional_json(&body)?;
    let notes = request
        .moderator_notes
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| {
            LibraryError::Validation("Moderator notes are required for rejection".to_string())
        })?;

    let document = ModerationService::new(state.store)
        .reject(id, notes)
        .await
        .ok_or(LibraryError::DocumentNotFound(id))?;
    Ok(Json(DocumentMessage::new("Tài liệu đã bị từ chối", document)))
}
