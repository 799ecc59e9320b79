//! Inputs and results of the matching pipeline.

use crate::entities::Location;
use thiserror::Error;
use uuid::Uuid;

/// One caller's report of an occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct EventReport<T> {
    /// Caller-asserted time of the occurrence, in milliseconds.
    pub event_time: i64,
    pub location: Location,
    /// Opaque data pooled with the other members of a match group.
    pub payload: Option<T>,
}

impl<T> EventReport<T> {
    pub fn new(event_time: i64, location: Location, payload: Option<T>) -> Self {
        Self {
            event_time,
            location,
            payload,
        }
    }
}

/// Successful result shared by every member of a match group.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome<T> {
    /// Correlation token, freshly generated per group.
    pub token: Uuid,
    /// Payloads of all group members in evaluation order, absent ones omitted.
    pub data: Vec<T>,
}

/// Terminal failures a submitter can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The queue was at capacity; the report was never enqueued.
    #[error("match queue full")]
    QueueFull,
    /// The report aged out without any partner.
    #[error("no match")]
    NoMatch,
    /// The matcher went away before the report was finalized.
    #[error("matcher dropped before the event was finalized")]
    Abandoned,
}

impl MatchError {
    /// Short machine-readable code, used in logs.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::QueueFull => "queue_full",
            MatchError::NoMatch => "no_match",
            MatchError::Abandoned => "abandoned",
        }
    }
}

/// What a [`PendingMatch`] eventually resolves to.
pub type MatchResult<T> = Result<MatchOutcome<T>, MatchError>;
