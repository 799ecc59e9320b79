//! Application state shared across all request handlers.

use evmatch_core::Matcher;
use serde_json::Value;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (the matcher is behind Arc).
#[derive(Clone)]
pub struct AppState {
    /// The matcher every `/event-match` request is submitted to.
    pub matcher: Matcher<Value>,
}

impl AppState {
    pub fn new(matcher: Matcher<Value>) -> Self {
        Self { matcher }
    }
}
