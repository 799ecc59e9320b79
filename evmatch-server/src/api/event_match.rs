use axum::{Json, extract::State, extract::rejection::JsonRejection};
use evmatch_core::EventReport;
use evmatch_core::entities::Location;
use evmatch_sdk::objects::{EventMatchRequest, EventMatchResponse};
use kanau::processor::Processor;

use super::ApiError;
use crate::state::AppState;

/// `POST /event-match` — submit a report and wait for its match.
///
/// The response is held until the matcher has finalized the report, which
/// takes at least the configured request-skew window.
pub(super) async fn event_match(
    State(state): State<AppState>,
    body: Result<Json<EventMatchRequest>, JsonRejection>,
) -> Result<Json<EventMatchResponse>, ApiError> {
    let Json(request) = body.map_err(ApiError::InvalidBody)?;
    let request = request.validate().map_err(ApiError::MissingParameter)?;

    let report = EventReport::new(
        request.time,
        Location::new(request.longitude, request.latitude),
        request.data,
    );
    let outcome = state.matcher.process(report).await?;

    tracing::debug!(
        token = %outcome.token,
        pooled = outcome.data.len(),
        "Event matched"
    );
    Ok(Json(EventMatchResponse {
        token: outcome.token,
        data: outcome.data,
    }))
}
