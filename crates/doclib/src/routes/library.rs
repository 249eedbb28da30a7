//! Library-wide routes: statistics and external source sync

use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{optional_json, ApiState};
use crate::error::LibraryResult;
use crate::models::LibraryStats;
use crate::services::{ImportReport, ImportService, StatsService};

/// Optional body for `POST /sync-drive`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    /// Target folder; its external reference narrows the listing
    pub folder_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub message: String,
    #[serde(flatten)]
    pub report: ImportReport,
}

pub fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/stats", get(stats))
        .route("/sync-drive", post(sync_drive))
        .with_state(state)
}

async fn stats(State(state): State<ApiState>) -> Json<LibraryStats> {
    Json(StatsService::new(state.store).stats().await)
}

async fn sync_drive(
    State(state): State<ApiState>,
    body: Bytes,
) -> LibraryResult<Json<SyncResponse>> {
    let request: SyncRequest = optional_json(&body)?;

    let Some(source) = state.source.clone() else {
        info!("Drive sync requested but no external source is configured");
        return Ok(Json(SyncResponse {
            message: "No external source configured".to_string(),
            report: ImportReport::default(),
        }));
    };

    let report = ImportService::new(state.store)
        .import_from(source.as_ref(), request.folder_id)
        .await?;
    Ok(Json(SyncResponse {
        message: "Google Drive sync completed".to_string(),
        report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::testing::send;
    use crate::source::{DriveFile, ExternalSource};
    use crate::store::LibraryStore;
    use async_trait::async_trait;
    use axum::http::{Method, StatusCode};
    use serde_json::json;
    use std::sync::Arc;

    struct BrokenSource;

    #[async_trait]
    impl ExternalSource for BrokenSource {
        async fn list_files(&self, _folder_ref: Option<&str>) -> anyhow::Result<Vec<DriveFile>> {
            anyhow::bail!("connection reset")
        }
    }

    #[tokio::test]
    async fn test_stats() {
        let app = routes(ApiState::new(LibraryStore::default()));
        let (status, body) = send(&app, Method::GET, "/stats", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["approvedDocuments"], 8);
        assert_eq!(body["pendingDocuments"], 0);
        assert_eq!(body["folders"], 6);
    }

    #[tokio::test]
    async fn test_sync_without_source() {
        let app = routes(ApiState::new(LibraryStore::default()));
        let (status, body) = send(&app, Method::POST, "/sync-drive", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "No external source configured");
        assert!(body["imported"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sync_errors() {
        let state = ApiState::new(LibraryStore::default()).with_source(Arc::new(BrokenSource));
        let app = routes(state);

        let (status, body) = send(&app, Method::POST, "/sync-drive", None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "EXTERNAL_SOURCE_ERROR");

        let (status, body) = send(
            &app,
            Method::POST,
            "/sync-drive",
            Some(json!({"folderId": 404})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "FOLDER_NOT_FOUND");
    }
}
