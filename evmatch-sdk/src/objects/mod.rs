pub mod event_match;

pub use event_match::{
    EVENT_MATCH_PATH, ErrorResponse, EventMatchRequest, EventMatchResponse, MissingParameter,
    ValidEventMatch,
};
