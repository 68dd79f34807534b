#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use job_tracker::{
    models::preference::Theme,
    routes::build_router,
    services::mock_job_board::MockJobBoard,
    storage::{KeyValueStorage, MemoryStorage},
    AppState,
};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub fn app_with_storage(storage: Arc<dyn KeyValueStorage>) -> Router {
    let state = AppState::from_parts(
        storage,
        Arc::new(MockJobBoard::new(Duration::ZERO)),
        Theme::Dark,
    );
    build_router(state, 1000)
}

pub fn app() -> Router {
    app_with_storage(Arc::new(MemoryStorage::new()))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
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
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}
