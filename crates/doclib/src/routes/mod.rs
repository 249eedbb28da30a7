//! Routes module - HTTP API endpoints
//!
//! Every handler builds the service it needs from the shared [`ApiState`];
//! services are thin wrappers over a cloned store handle.

pub mod admin;
pub mod contributions;
pub mod documents;
pub mod folders;
pub mod library;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use axum::{Json, Router};
use serde::de::DeserializeOwned;

use crate::error::{LibraryError, LibraryResult};
use crate::source::ExternalSource;
use crate::store::LibraryStore;

/// Shared state for all library routes
#[derive(Clone)]
pub struct ApiState {
    pub store: LibraryStore,
    /// Source used by `POST /api/sync-drive`, if any
    pub source: Option<Arc<dyn ExternalSource>>,
}

impl ApiState {
    pub fn new(store: LibraryStore) -> Self {
        Self {
            store,
            source: None,
        }
    }

    pub fn with_source(mut self, source: Arc<dyn ExternalSource>) -> Self {
        self.source = Some(source);
        self
    }
}

/// Configure all library routes under `/api`
pub fn configure(state: ApiState) -> Router {
    Router::new().nest("/api", api_routes(state))
}

fn api_routes(state: ApiState) -> Router {
    Router::new()
        .merge(folders::routes(state.clone()))
        .merge(documents::routes(state.clone()))
        .merge(contributions::routes(state.clone()))
        .merge(admin::routes(state.clone()))
        .merge(library::routes(state))
}

/// Unwrap a JSON body, reporting malformed input as a validation error
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> LibraryResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| LibraryError::Validation(rejection.body_text()))
}

/// Unwrap path parameters, reporting unparsable segments as a validation error
pub(crate) fn path_param<T>(path: Result<Path<T>, PathRejection>) -> LibraryResult<T> {
    path.map(|Path(value)| value)
        .map_err(|rejection| LibraryError::Validation(rejection.body_text()))
}

/// Unwrap query parameters, reporting malformed ones as a validation error
pub(crate) fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> LibraryResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| LibraryError::Validation(rejection.body_text()))
}

/// Parse an optional JSON body; an empty body yields the default value
pub(crate) fn optional_json<T>(body: &Bytes) -> LibraryResult<T>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| LibraryError::Validation(e.to_string()))
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    /// Send one request through the router and decode the JSON response.
    /// Empty bodies decode as `Value::Null`.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }
}
