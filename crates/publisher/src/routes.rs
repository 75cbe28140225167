//! HTTP routes
//!
//! Every request reads the artifact slot on its own; nothing here is tied
//! to the polling cadence.

use axum::extract::State;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use bytes::Bytes;
use capture::LatestArtifactStore;
use contracts::PublishConfig;
use tracing::debug;

use crate::page::viewer_page;

/// Body of the 503 returned before the first capture
pub const NOT_READY_BODY: &str = "No image received yet.";

pub const X_CAPTURE_SEQUENCE: HeaderName = HeaderName::from_static("x-capture-sequence");
pub const X_CAPTURE_FILE: HeaderName = HeaderName::from_static("x-capture-file");

#[derive(Clone)]
struct AppState {
    artifacts: LatestArtifactStore,
    page: Bytes,
}

/// Build the router over `artifacts`
pub fn router(artifacts: LatestArtifactStore, config: &PublishConfig) -> Router {
    let state = AppState {
        artifacts,
        page: Bytes::from(viewer_page(config.refresh_interval_ms)),
    };

    Router::new()
        .route("/", get(index))
        .route("/image.jpg", get(latest_image))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> Html<Bytes> {
    Html(state.page)
}

async fn latest_image(State(state): State<AppState>) -> Response {
    let Some(artifact) = state.artifacts.get() else {
        observability::record_artifact_request(false);
        debug!("Image requested before first capture");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            [(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
            NOT_READY_BODY,
        )
            .into_response();
    };

    observability::record_artifact_request(true);

    let file_name = artifact
        .source
        .file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| HeaderValue::from_str(n).ok())
        .unwrap_or_else(|| HeaderValue::from_static("unknown"));

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static(artifact.content_type)),
            (CACHE_CONTROL, HeaderValue::from_static("no-cache")),
            (X_CAPTURE_SEQUENCE, HeaderValue::from(artifact.sequence)),
            (X_CAPTURE_FILE, file_name),
        ],
        artifact.body.clone(),
    )
        .into_response()
}
