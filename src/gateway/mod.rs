//! HTTP gateway (Axum) over the scoring pipeline.
//!
//! This module is primarily used by the `ailment` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{condition_handler, reload_handler, score_handler};
pub use state::HandlerState;

use crate::cache::{
    AILMENT_STATUS_HEADER, AILMENT_STATUS_HEALTHY, AILMENT_STATUS_NOT_READY, AILMENT_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/score", post(score_handler))
        .route("/v1/conditions/reload", post(reload_handler))
        .route("/v1/conditions/{name}", get(condition_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotStatus>,
}

#[derive(serde::Serialize)]
pub struct SnapshotStatus {
    pub source: &'static str,
    pub epoch: u64,
    pub conditions: usize,
    pub digest: String,
    pub age_secs: u64,
    pub loaded_at: String,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        AILMENT_STATUS_HEADER,
        HeaderValue::from_static(AILMENT_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// Ready once the repository holds a snapshot (store-backed or fallback).
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let snapshot = state.pipeline.repository().current().map(|s| SnapshotStatus {
        source: s.source().as_str(),
        epoch: s.epoch(),
        conditions: s.len(),
        digest: s.digest_hex(),
        age_secs: s.age().as_secs(),
        loaded_at: s.loaded_at().to_rfc3339(),
    });

    let (status_code, status_msg) = if snapshot.is_some() {
        (StatusCode::OK, AILMENT_STATUS_READY)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, AILMENT_STATUS_NOT_READY)
    };

    let mut headers = HeaderMap::new();
    headers.insert(AILMENT_STATUS_HEADER, HeaderValue::from_static(status_msg));

    (
        status_code,
        headers,
        Json(ReadyResponse {
            status: if snapshot.is_some() { "ok" } else { "pending" },
            snapshot,
        }),
    )
        .into_response()
}
