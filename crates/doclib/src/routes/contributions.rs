//! Public contribution route

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use validator::Validate;

use super::{json_body, ApiState};
use crate::error::LibraryResult;
use crate::models::{Contribution, DocumentMessage};
use crate::services::ModerationService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/contribute", post(contribute))
        .with_state(state)
}

async fn contribute(
    State(state): State<ApiState>,
    payload: Result<Json<Contribution>, JsonRejection>,
) -> LibraryResult<(StatusCode, Json<DocumentMessage>)> {
    let contribution = json_body(payload)?;
    contribution.validate()?;

    let document = ModerationService::new(state.store)
        .submit_contribution(contribution)
        .await;
    Ok((
        StatusCode::CREATED,
        Json(DocumentMessage::new("Tài liệu đã được gửi để duyệt", document)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryConfig;
    use crate::routes::testing::send;
    use crate::store::LibraryStore;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_invalid_contributions() {
        let app = routes(ApiState::new(LibraryStore::new(LibraryConfig::unseeded())));

        let (status, body) = send(
            &app,
            Method::POST,
            "/contribute",
            Some(json!({
                "title": "X",
                "fileName": "x.pdf",
                "fileSize": 1,
                "uploaderName": "A",
                "uploaderEmail": "not-an-email"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, _) = send(
            &app,
            Method::POST,
            "/contribute",
            Some(json!({"title": "X", "fileName": "x.pdf", "fileSize": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_contribution_registers_user_once() {
        let store = LibraryStore::new(LibraryConfig::unseeded());
        let app = routes(ApiState::new(store.clone()));
        let payload = json!({
            "title": "X",
            "fileName": "x.pdf",
            "fileSize": 1,
            "uploaderName": "Minh",
            "uploaderEmail": "minh@example.com"
        });

        let (_, first) = send(&app, Method::POST, "/contribute", Some(payload.clone())).await;
        let (_, second) = send(&app, Method::POST, "/contribute", Some(payload)).await;
        assert_eq!(first["document"]["uploadedBy"], second["document"]["uploadedBy"]);
        assert_ne!(first["document"]["id"], second["document"]["id"]);

        let users = crate::services::UserService::new(store).list().await;
        assert_eq!(users.len(), 1);
    }
}
