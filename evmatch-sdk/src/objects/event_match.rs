//! Request and response bodies of `POST /event-match`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Path of the matching endpoint.
pub const EVENT_MATCH_PATH: &str = "/event-match";

/// A report submitted for matching.
///
/// The three positional fields are optional on the wire so that the server
/// can name the missing one in its error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMatchRequest {
    /// Time of the occurrence in milliseconds.
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Opaque data shared with every matched submitter.
    ///
    /// An explicit `null` is kept as `Some(Value::Null)` and pooled; only an
    /// absent field means "no data".
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
}

fn present_value<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// A required request field was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Missing required parameter `{0}`")]
pub struct MissingParameter(pub &'static str);

/// An [`EventMatchRequest`] with every required field present.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidEventMatch {
    pub time: i64,
    pub longitude: f64,
    pub latitude: f64,
    pub data: Option<Value>,
}

impl EventMatchRequest {
    pub fn new(time: i64, longitude: f64, latitude: f64) -> Self {
        Self {
            time: Some(time),
            longitude: Some(longitude),
            latitude: Some(latitude),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Check the required fields, in the order `time`, `latitude`, `longitude`.
    pub fn validate(self) -> Result<ValidEventMatch, MissingParameter> {
        let time = self.time.ok_or(MissingParameter("time"))?;
        let latitude = self.latitude.ok_or(MissingParameter("latitude"))?;
        let longitude = self.longitude.ok_or(MissingParameter("longitude"))?;
        Ok(ValidEventMatch {
            time,
            longitude,
            latitude,
            data: self.data,
        })
    }
}

/// Returned to every member of a match group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMatchResponse {
    /// Correlation token shared by the whole group.
    pub token: Uuid,
    /// Data items of the group members, in matching order.
    pub data: Vec<Value>,
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub const NO_MATCH: &'static str = "No match";
    pub const QUEUE_FULL: &'static str = "Match queue full";
    pub const INTERNAL: &'static str = "Internal server error";

    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
