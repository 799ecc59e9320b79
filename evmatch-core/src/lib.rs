#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod config;
pub mod entities;
pub mod events;
pub mod matcher;
pub mod processors;
pub mod utils;

pub use config::MatcherConfig;
pub use events::{EventReport, MatchError, MatchOutcome, PendingMatch};
pub use matcher::Matcher;
