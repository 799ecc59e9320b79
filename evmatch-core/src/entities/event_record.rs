use super::Location;
use crate::events::{AlreadyResolved, MatchResult, OutcomeSink};
use tokio::time::Instant;

/// A queued report together with the sink its submitter is waiting on.
#[derive(Debug)]
pub struct EventRecord<T> {
    arrival_time: Instant,
    event_time: i64,
    location: Location,
    payload: Option<T>,
    matched: bool,
    sink: OutcomeSink<T>,
}

impl<T> EventRecord<T> {
    pub fn new(
        arrival_time: Instant,
        event_time: i64,
        location: Location,
        payload: Option<T>,
        sink: OutcomeSink<T>,
    ) -> Self {
        Self {
            arrival_time,
            event_time,
            location,
            payload,
            matched: false,
            sink,
        }
    }

    pub fn arrival_time(&self) -> Instant {
        self.arrival_time
    }

    pub fn event_time(&self) -> i64 {
        self.event_time
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    /// Flag the record as a member of a match group. There is no way back.
    pub fn mark_matched(&mut self) {
        self.matched = true;
    }

    pub fn is_resolved(&self) -> bool {
        self.sink.is_resolved()
    }

    /// Deliver the final result to the submitter.
    ///
    /// `Ok(false)` means the submitter is no longer listening.
    pub fn resolve(&mut self, result: MatchResult<T>) -> Result<bool, AlreadyResolved> {
        self.sink.resolve(result)
    }
}
