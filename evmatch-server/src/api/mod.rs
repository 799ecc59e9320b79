//! HTTP API handlers.
//!
//! # Endpoints
//!
//! - `POST /event-match` – submit an event report, respond with its match

use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use evmatch_core::MatchError;
use evmatch_sdk::objects::{EVENT_MATCH_PATH, ErrorResponse, MissingParameter};

use crate::state::AppState;

mod event_match;

/// Build the API router.
pub fn router() -> Router<AppState> {
    Router::new().route(EVENT_MATCH_PATH, post(event_match::event_match))
}

// ---------------------------------------------------------------------------
// Error handling
// ---------------------------------------------------------------------------

/// Errors that can occur in API handlers.
#[derive(Debug)]
enum ApiError {
    /// The body was not acceptable JSON (or exceeded the size limit).
    InvalidBody(JsonRejection),
    /// A required field was missing from the body.
    MissingParameter(MissingParameter),
    /// The matcher rejected or failed to match the report.
    Match(MatchError),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        ApiError::Match(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
            ApiError::MissingParameter(missing) => (StatusCode::BAD_REQUEST, missing.to_string()),
            ApiError::Match(e @ MatchError::NoMatch) => {
                tracing::debug!(code = e.code(), "No match found for report");
                (StatusCode::NOT_FOUND, ErrorResponse::NO_MATCH.to_string())
            }
            ApiError::Match(e @ MatchError::QueueFull) => {
                tracing::debug!(code = e.code(), "Report rejected, match queue full");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::QUEUE_FULL.to_string(),
                )
            }
            ApiError::Match(e @ MatchError::Abandoned) => {
                tracing::error!(
                    error = %e,
                    code = e.code(),
                    "Matcher failed to deliver an outcome"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::INTERNAL.to_string(),
                )
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
