//! Folder routes

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use validator::Validate;

use super::{json_body, path_param, ApiState};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{Folder, FolderTreeNode, NewFolder};
use crate::services::FolderService;

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/folders", get(list_folders).post(create_folder))
        .route("/folders/tree", get(folder_tree))
        .route("/folders/{id}", get(get_folder))
        .with_state(state)
}

async fn list_folders(State(state): State<ApiState>) -> Json<Vec<Folder>> {
    Json(FolderService::new(state.store).list().await)
}

async fn folder_tree(State(state): State<ApiState>) -> Json<Vec<FolderTreeNode>> {
    Json(FolderService::new(state.store).tree().await)
}

async fn get_folder(
    State(state): State<ApiState>,
    path: Result<Path<i64>, PathRejection>,
) -> LibraryResult<Json<Folder>> {
    let id = path_param(path)?;
    FolderService::new(state.store)
        .get(id)
        .await
        .map(Json)
        .ok_or(LibraryError::FolderNotFound(id))
}

async fn create_folder(
    State(state): State<ApiState>,
    payload: Result<Json<NewFolder>, JsonRejection>,
) -> LibraryResult<(StatusCode, Json<Folder>)> {
    let new = json_body(payload)?;
    new.validate()?;

    let folder = FolderService::new(state.store).create(new).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibraryConfig;
    use crate::routes::testing::send;
    use crate::store::LibraryStore;
    use axum::http::Method;
    use serde_json::json;

    fn app(config: LibraryConfig) -> Router {
        routes(ApiState::new(LibraryStore::new(config)))
    }

    #[tokio::test]
    async fn test_list_and_get() {
        let app = app(LibraryConfig::default());

        let (status, body) = send(&app, Method::GET, "/folders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 6);
        assert_eq!(body[0]["googleDriveId"], "education");

        let (status, body) = send(&app, Method::GET, "/folders/2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Toán học");
        assert_eq!(body["parentId"], 1);
        assert_eq!(body["documentCount"], 2);

        let (status, body) = send(&app, Method::GET, "/folders/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "FOLDER_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_tree() {
        let app = app(LibraryConfig::default());
        let (_, body) = send(&app, Method::GET, "/folders/tree", None).await;
        let roots = body.as_array().unwrap();
        assert_eq!(roots.len(), 4);
        assert_eq!(roots[0]["children"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create() {
        let app = app(LibraryConfig::unseeded());

        let (status, body) = send(
            &app,
            Method::POST,
            "/folders",
            Some(json!({"name": "Lịch sử", "googleDriveId": "history"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["documentCount"], 0);
        assert!(body["parentId"].is_null());

        let (status, _) = send(&app, Method::POST, "/folders", Some(json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_with_unknown_parent_when_strict() {
        let app = app(LibraryConfig {
            strict_folder_parents: true,
            ..LibraryConfig::unseeded()
        });
        let (status, body) = send(
            &app,
            Method::POST,
            "/folders",
            Some(json!({"name": "Orphan", "parentId": 7})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PARENT_FOLDER_NOT_FOUND");
    }
}
