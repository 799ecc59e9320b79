//! Report and result types exchanged between submitters and the scheduler.
//!
//! # Flow
//!
//! 1. A submitter hands an [`EventReport`] to the matcher
//! 2. The matcher queues it with an [`OutcomeSink`] and returns a [`PendingMatch`]
//! 3. A scheduler pass resolves the sink with a [`MatchResult`]

pub mod outcome;
pub mod types;

pub use outcome::{AlreadyResolved, OutcomeSink, PendingMatch, outcome_channel};
pub use types::{EventReport, MatchError, MatchOutcome, MatchResult};
