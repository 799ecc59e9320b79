//! The public entry point of the matching engine.
//!
//! A [`Matcher`] owns an [`EventQueue`] and a [`MatchScheduler`]. Callers
//! [`submit`](Matcher::submit) reports and await the returned
//! [`PendingMatch`]; the scheduler finalizes queued reports in the
//! background. Admission and scheduler passes take the same lock, so they
//! never interleave.

use crate::config::{MatcherConfig, MatcherConfigError};
use crate::entities::{CapacityExceeded, EventQueue, EventRecord, Location};
use crate::events::{EventReport, MatchError, MatchOutcome, PendingMatch, outcome_channel};
use crate::processors::{BatchError, BatchSummary, MatchScheduler, process_batch};
use crate::utils::geo_distance::{GeoDistance, Haversine};
use kanau::processor::Processor;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Groups reports of the same occurrence by time and place.
///
/// Cloning is cheap and every clone refers to the same queue and scheduler.
/// When the last clone is dropped the scheduler stops and every report still
/// waiting resolves to [`MatchError::Abandoned`].
pub struct Matcher<T> {
    inner: Arc<MatcherInner<T>>,
}

struct MatcherInner<T> {
    config: MatcherConfig,
    distance: Box<dyn GeoDistance>,
    queue: Mutex<EventQueue<T>>,
    scheduler: MatchScheduler,
}

impl<T> MatcherInner<T> {
    fn lock_queue(&self) -> MutexGuard<'_, EventQueue<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone + Send + 'static> MatcherInner<T> {
    fn run_batch(&self, now: Instant) -> Result<BatchSummary, BatchError> {
        let mut queue = self.lock_queue();
        let summary = process_batch(&mut queue, now, &self.config, self.distance.as_ref())?;
        if summary.finalized > 0 {
            debug!(
                finalized = summary.finalized,
                groups = summary.groups,
                grouped = summary.grouped,
                unmatched = summary.unmatched,
                queued = queue.len(),
                "Processed match batch"
            );
        }
        Ok(summary)
    }
}

impl<T: Clone + Send + 'static> Matcher<T> {
    /// Create a matcher measuring distance with [`Haversine`].
    pub fn new(config: MatcherConfig) -> Result<Self, MatcherConfigError> {
        Self::with_distance(config, Haversine)
    }

    /// Create a matcher with a custom distance function.
    pub fn with_distance(
        config: MatcherConfig,
        distance: impl GeoDistance,
    ) -> Result<Self, MatcherConfigError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(MatcherInner {
                queue: Mutex::new(EventQueue::new(config.max_queue_size)),
                scheduler: MatchScheduler::new(config.interval),
                distance: Box::new(distance),
                config,
            }),
        })
    }

    /// Queue a report for matching.
    ///
    /// Never blocks. The scheduler is started on the first successful
    /// admission. If the queue is full the returned result is already
    /// settled with [`MatchError::QueueFull`].
    pub fn submit(
        &self,
        event_time: i64,
        longitude: f64,
        latitude: f64,
        payload: Option<T>,
    ) -> PendingMatch<T> {
        self.submit_report(EventReport::new(
            event_time,
            Location::new(longitude, latitude),
            payload,
        ))
    }

    /// Same as [`submit`](Self::submit), taking a prepared report.
    pub fn submit_report(&self, report: EventReport<T>) -> PendingMatch<T> {
        let (sink, pending) = outcome_channel();

        // Arrival is stamped under the lock so the queue stays in arrival order.
        let admitted = {
            let mut queue = self.inner.lock_queue();
            queue.admit(EventRecord::new(
                Instant::now(),
                report.event_time,
                report.location,
                report.payload,
                sink,
            ))
        };
        match admitted {
            Ok(()) => {
                self.start();
            }
            Err(CapacityExceeded { mut record }) => {
                warn!(
                    capacity = self.inner.config.max_queue_size,
                    "Match queue full, rejecting event"
                );
                if record.resolve(Err(MatchError::QueueFull)).is_err() {
                    error!("Rejected event was already resolved");
                }
            }
        }
        pending
    }

    /// Start the periodic scheduler. Does nothing if it is already running.
    pub fn start(&self) {
        let weak = Arc::downgrade(&self.inner);
        self.inner.scheduler.start(move |now| {
            let Some(inner) = weak.upgrade() else {
                return ControlFlow::Break(());
            };
            if let Err(e) = inner.run_batch(now) {
                error!(error = %e, "Match batch aborted");
            }
            ControlFlow::Continue(())
        });
    }

    /// Stop the periodic scheduler. Queued reports stay queued.
    pub fn stop(&self) {
        self.inner.scheduler.stop();
    }

    pub fn is_running(&self) -> bool {
        self.inner.scheduler.is_running()
    }

    /// Run one batch pass immediately, outside the regular cadence.
    pub fn process_now(&self) -> Result<BatchSummary, BatchError> {
        self.inner.run_batch(Instant::now())
    }

    /// Number of queued reports, including matched ones not yet aged out.
    pub fn queue_len(&self) -> usize {
        self.inner.lock_queue().len()
    }

    pub fn capacity(&self) -> usize {
        self.inner.config.max_queue_size
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.inner.config
    }
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Processor<EventReport<T>> for Matcher<T> {
    type Output = MatchOutcome<T>;
    type Error = MatchError;

    async fn process(&self, report: EventReport<T>) -> Result<MatchOutcome<T>, MatchError> {
        self.submit_report(report).await
    }
}
