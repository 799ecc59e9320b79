//! Single-assignment delivery of match results.
//!
//! Every admitted report owns an [`OutcomeSink`]; its submitter holds the
//! paired [`PendingMatch`]. The scheduler resolves the sink exactly once.

use super::types::{MatchError, MatchResult};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use thiserror::Error;
use tokio::sync::oneshot;

/// Raised when an already-resolved sink is resolved again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("outcome sink resolved twice")]
pub struct AlreadyResolved;

/// Producer half of a pending result.
#[derive(Debug)]
pub struct OutcomeSink<T> {
    tx: Option<oneshot::Sender<MatchResult<T>>>,
}

impl<T> OutcomeSink<T> {
    /// Deliver the result.
    ///
    /// Returns `Ok(false)` when the submitter stopped waiting; the sink is
    /// consumed either way.
    pub fn resolve(&mut self, result: MatchResult<T>) -> Result<bool, AlreadyResolved> {
        let tx = self.tx.take().ok_or(AlreadyResolved)?;
        Ok(tx.send(result).is_ok())
    }

    pub fn is_resolved(&self) -> bool {
        self.tx.is_none()
    }
}

/// Consumer half of a pending result.
///
/// Resolves to the match outcome, or to [`MatchError::Abandoned`] if the
/// producer side is dropped unresolved.
#[derive(Debug)]
pub struct PendingMatch<T> {
    rx: oneshot::Receiver<MatchResult<T>>,
}

impl<T> Future for PendingMatch<T> {
    type Output = MatchResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(MatchError::Abandoned)))
    }
}

/// Create a linked (sink, pending) pair.
pub fn outcome_channel<T>() -> (OutcomeSink<T>, PendingMatch<T>) {
    let (tx, rx) = oneshot::channel();
    (OutcomeSink { tx: Some(tx) }, PendingMatch { rx })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MatchOutcome;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_resolves_once() {
        let (mut sink, pending) = outcome_channel::<&str>();
        let token = Uuid::new_v4();
        assert_eq!(
            sink.resolve(Ok(MatchOutcome {
                token,
                data: vec!["A"],
            })),
            Ok(true)
        );
        assert!(sink.is_resolved());
        assert_eq!(sink.resolve(Err(MatchError::NoMatch)), Err(AlreadyResolved));

        let outcome = pending.await.unwrap();
        assert_eq!(outcome.token, token);
        assert_eq!(outcome.data, vec!["A"]);
    }

    #[tokio::test]
    async fn test_dropped_sink_abandons() {
        let (sink, pending) = outcome_channel::<()>();
        drop(sink);
        assert_eq!(pending.await, Err(MatchError::Abandoned));
    }

    #[test]
    fn test_resolve_after_caller_left() {
        let (mut sink, pending) = outcome_channel::<()>();
        drop(pending);
        assert_eq!(sink.resolve(Err(MatchError::NoMatch)), Ok(false));
    }
}
