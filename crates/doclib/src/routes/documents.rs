//! Document routes

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use validator::Validate;

use super::{json_body, path_param, query_params, ApiState};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Document, DocumentPatch, DownloadResponse, NewDocument};
use crate::services::DocumentService;

/// Query params for listing documents
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsParams {
    pub search: Option<String>,
    pub folder_id: Option<i64>,
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route("/documents/favorites", get(list_favorites))
        .route(
            "/documents/{id}",
            get(get_document)
                .patch(update_document)
                .delete(delete_document),
        )
        .route("/documents/{id}/download", post(download_document))
        .route("/documents/{id}/favorite", post(toggle_favorite))
        .with_state(state)
}

/// A non-empty `search` takes precedence over `folderId`
async fn list_documents(
    State(state): State<ApiState>,
    query: Result<Query<ListDocumentsParams>, QueryRejection>,
) -> LibraryResult<Json<Vec<Document>>> {
    let params = query_params(query)?;
    let service = DocumentService::new(state.store);

    let documents = match (params.search.as_deref(), params.folder_id) {
        (Some(query), _) if !query.is_empty() => service.search(query).await,
        (_, Some(folder_id)) => service.list_approved_by_folder(folder_id).await,
        _ => service.list_approved().await,
    };
    Ok(Json(documents))
}

async fn list_favorites(State(state): State<ApiState>) -> Json<Vec<Document>> {
    Json(DocumentService::new(state.store).list_favorites().await)
}

async fn get_document(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
) -> LibraryResult<Json<Document>> {
    let id = path_param(path)?;
    DocumentService::new(state.store)
        .get(id)
        .await
        .map(Json)
        .ok_or(LibraryError::DocumentNotFound(id))
}

async fn create_document(
    State(state): State<ApiState>,
    payload: Result<Json<NewDocument>, JsonRejection>,
) -> LibraryResult<(StatusCode, Json<Document>)> {
    let new = json_body(payload)?;
    new.validate()?;

    let document = DocumentService::new(state.store).create(new).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

async fn update_document(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DocumentPatch>, JsonRejection>,
) -> LibraryResult<Json<Document>> {
    let id = path_param(path)?;
    let patch = json_body(payload)?;
    patch.validate()?;

    DocumentService::new(state.store)
        .update(id, patch)
        .await?
        .map(Json)
        .ok_or(LibraryError::DocumentNotFound(id))
}

async fn delete_document(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
) -> LibraryResult<StatusCode> {
    let id = path_param(path)?;
    if DocumentService::new(state.store).delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(LibraryError::DocumentNotFound(id))
    }
}

async fn download_document(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
) -> LibraryResult<Json<DownloadResponse>> {
    let id = path_param(path)?;
    DocumentService::new(state.store)
        .download(id)
        .await
        .map(Json)
        .ok_or(LibraryError::DocumentNotFound(id))
}

async fn toggle_favorite(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
) -> LibraryResult<Json<Document>> {
    let id = path_param(path)?;
    DocumentService::new(state.store)
        .toggle_favorite(id)
        .await
        .map(Json)
        .ok_or(LibraryError::DocumentNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::send;
    use crate::store::LibraryStore;
    use axum::http::Method;
    use serde_json::json;

    fn app() -> Router {
        routes(ApiState::new(LibraryStore::default()))
    }

    fn ids(body: &serde_json::Value) -> Vec<i64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_filters() {
        let app = app();

        let (_, all) = send(&app, Method::GET, "/documents", None).await;
        assert_eq!(ids(&all), (1..=8).collect::<Vec<_>>());

        let (_, math) = send(&app, Method::GET, "/documents?folderId=2", None).await;
        assert_eq!(ids(&math), vec![1, 8]);

        // search wins over folderId
        let (_, found) = send(&app, Method::GET, "/documents?search=PYTHON&folderId=2", None).await;
        assert_eq!(ids(&found), vec![3]);

        // empty search falls back to the folder filter
        let (_, math) = send(&app, Method::GET, "/documents?search=&folderId=2", None).await;
        assert_eq!(ids(&math), vec![1, 8]);

        let (_, favorites) = send(&app, Method::GET, "/documents/favorites", None).await;
        assert_eq!(ids(&favorites), vec![1, 3, 6, 8]);
    }

    #[tokio::test]
    async fn test_create_and_conflict() {
        let app = app();
        let payload = json!({
            "title": "Hóa học hữu cơ",
            "fileName": "hoa-hoc.pdf",
            "fileSize": 1024,
            "googleDriveId": "drive-hoa",
            "folderId": 1
        });

        let (status, body) = send(&app, Method::POST, "/documents", Some(payload.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 9);
        assert_eq!(body["status"], "approved");
        assert_eq!(body["downloadUrl"], "");
        assert_eq!(body["mimeType"], "application/pdf");
        assert_eq!(body["isFavorite"], false);

        let (_, folder_docs) = send(&app, Method::GET, "/documents?folderId=1", None).await;
        assert_eq!(ids(&folder_docs), vec![7, 9]);

        let (status, body) = send(&app, Method::POST, "/documents", Some(payload)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "CONFLICT");

        let (status, _) = send(
            &app,
            Method::POST,
            "/documents",
            Some(json!({"title": "", "fileName": "a.pdf", "fileSize": 1, "googleDriveId": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_update_delete() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/documents/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Công Thức Vật Lý Tổng Hợp");

        let (status, body) = send(
            &app,
            Method::PATCH,
            "/documents/2",
            Some(json!({"title": "Vật Lý 12", "description": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Vật Lý 12");
        assert!(body["description"].is_null());
        assert_eq!(body["fileName"], "cong-thuc-vat-ly-tong-hop.pdf");

        let (status, _) = send(&app, Method::PATCH, "/documents/99", Some(json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, "/documents/2", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, _) = send(&app, Method::DELETE, "/documents/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::GET, "/documents/2", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_params_use_error_body() {
        let app = app();

        let (status, body) = send(&app, Method::GET, "/documents?folderId=x", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, Method::GET, "/documents/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(&app, Method::POST, "/documents/abc/download", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_patch_rejects_empty_required_fields() {
        let app = app();

        for payload in [json!({"title": ""}), json!({"googleDriveId": ""}), json!({"fileName": ""})] {
            let (status, body) = send(&app, Method::PATCH, "/documents/3", Some(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "VALIDATION_ERROR");
        }

        let (_, doc) = send(&app, Method::GET, "/documents/3", None).await;
        assert_eq!(doc["title"], "Hướng Dẫn Lập Trình Python");
    }

    #[tokio::test]
    async fn test_patch_missing_document_with_taken_ref() {
        let app = app();
        let (status, body) = send(
            &app,
            Method::PATCH,
            "/documents/404",
            Some(json!({"googleDriveId": "1vE2upms8"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "DOCUMENT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_download_and_favorite() {
        let app = app();

        let (_, before) = send(&app, Method::GET, "/documents/5", None).await;
        let (status, body) = send(&app, Method::POST, "/documents/5/download", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["downloadUrl"], before["downloadUrl"]);

        let (_, after) = send(&app, Method::GET, "/documents/5", None).await;
        assert_eq!(
            after["downloadCount"].as_u64().unwrap(),
            before["downloadCount"].as_u64().unwrap() + 1
        );

        let (status, body) = send(&app, Method::POST, "/documents/5/favorite", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isFavorite"], true);

        let (status, _) = send(&app, Method::POST, "/documents/42/download", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::POST, "/documents/42/favorite", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
