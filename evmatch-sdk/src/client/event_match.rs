//! Client for the matching endpoint.

use reqwest::{Client, StatusCode};
use url::Url;

use super::ClientError;
use crate::objects::{EVENT_MATCH_PATH, EventMatchRequest, EventMatchResponse};

/// Typed HTTP client for `POST /event-match`.
///
/// A call stays pending until the server has finalized the report, which
/// takes at least the server's request-skew window.
#[derive(Debug, Clone)]
pub struct EventMatchClient {
    http: Client,
    base_url: Url,
}

impl EventMatchClient {
    /// Create a new client for the server at `base_url`.
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Replace the default `reqwest::Client` with a custom one (e.g. to
    /// configure timeouts or a proxy).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// Submit a report and wait for its match.
    pub async fn submit(
        &self,
        request: &EventMatchRequest,
    ) -> Result<EventMatchResponse, ClientError> {
        let url = self.base_url.join(EVENT_MATCH_PATH)?;
        let resp = self.http.post(url).json(request).send().await?;

        let status = resp.status();
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NoMatch),
            StatusCode::SERVICE_UNAVAILABLE => Err(ClientError::QueueFull),
            s if s.is_success() => {
                let bytes = resp.bytes().await?;
                serde_json::from_slice(&bytes).map_err(ClientError::Json)
            }
            _ => {
                let body = resp.text().await.unwrap_or_default();
                Err(ClientError::Api { status, body })
            }
        }
    }
}
