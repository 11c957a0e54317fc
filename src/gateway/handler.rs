use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::cache::{AILMENT_STATUS_HEADER, AILMENT_STATUS_RELOADED, ScoreStatus};
use crate::constants::MAX_REQUEST_FACTORS;
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{ReloadResponse, ScoreRequest};
use crate::gateway::state::HandlerState;
use crate::scoring::IdentifiedFactors;

#[instrument(skip(state, request), fields(factors = tracing::field::Empty))]
pub async fn score_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: ScoreRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;

    if request.factors.len() > MAX_REQUEST_FACTORS {
        return Err(GatewayError::InvalidRequest(format!(
            "too many factors: {} (max {})",
            request.factors.len(),
            MAX_REQUEST_FACTORS
        )));
    }

    let factors = IdentifiedFactors::new(&request.factors);
    tracing::Span::current().record("factors", factors.len());
    let body_location = request.body_location.as_deref();

    if let Some(external) = request.external_predictions {
        debug!(external = external.len(), "Merging caller-supplied predictions");
        let result = state
            .pipeline
            .score_with_predictions(&factors, body_location, external)
            .await;
        return Ok(make_response(ScoreStatus::Miss, Json(result)));
    }

    let outcome = state.pipeline.run(&factors, body_location).await;
    debug!(status = %outcome.status, epoch = outcome.epoch, "Scored");
    Ok(make_response(outcome.status, Json(outcome.result.as_ref().clone())))
}

#[instrument(skip(state))]
pub async fn condition_handler(
    State(state): State<HandlerState>,
    Path(name): Path<String>,
) -> Result<Response, GatewayError> {
    let condition = state
        .pipeline
        .repository()
        .get_by_name(&name)
        .await
        .ok_or(GatewayError::ConditionNotFound(name))?;

    Ok((StatusCode::OK, Json(condition)).into_response())
}

#[instrument(skip(state))]
pub async fn reload_handler(State(state): State<HandlerState>) -> Response {
    let snapshot = state.pipeline.repository().load().await;
    info!(epoch = snapshot.epoch(), source = snapshot.source().as_str(), "Conditions reloaded on request");

    let mut headers = HeaderMap::new();
    headers.insert(
        AILMENT_STATUS_HEADER,
        HeaderValue::from_static(AILMENT_STATUS_RELOADED),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReloadResponse {
            status: "ok",
            source: snapshot.source().as_str(),
            epoch: snapshot.epoch(),
            conditions: snapshot.len(),
            digest: snapshot.digest_hex(),
        }),
    )
        .into_response()
}

fn make_response<T: IntoResponse>(status: ScoreStatus, body: T) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        AILMENT_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );
    (StatusCode::OK, headers, body).into_response()
}
