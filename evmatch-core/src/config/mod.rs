//! Configuration types for the matching engine.
//!
//! These are the validated runtime values. Loading them from files or the
//! command line is left to the server crate.

mod matcher;

pub use matcher::{
    DEFAULT_INTERVAL, DEFAULT_MAX_CLOCK_SKEW, DEFAULT_MAX_DISTANCE, DEFAULT_MAX_QUEUE_SIZE,
    DEFAULT_MAX_REQUEST_SKEW, MatcherConfig, MatcherConfigError,
};
