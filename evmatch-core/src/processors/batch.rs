//! A single scheduler pass over the event queue.
//!
//! Every record that has been queued for longer than `max_request_skew` is
//! finalized. Walking the aged prefix in arrival order, each record that is
//! not yet matched becomes an anchor and pulls in every later unmatched
//! record (aged or not) whose event time and location are within tolerance
//! of the anchor itself. Membership is decided against the anchor only; the
//! groups are not a transitive closure.

use crate::config::MatcherConfig;
use crate::entities::{DrainOutOfBounds, EventQueue};
use crate::events::{AlreadyResolved, MatchError, MatchOutcome};
use crate::utils::geo_distance::GeoDistance;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, error};
use uuid::Uuid;

/// Invariant violations detected during a pass.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("record at index {index} was resolved twice")]
    DoubleResolution {
        index: usize,
        #[source]
        source: AlreadyResolved,
    },
    #[error("failed to drain finalized records: {0}")]
    Drain(#[from] DrainOutOfBounds),
}

/// Counters describing one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Records removed from the head of the queue.
    pub finalized: usize,
    /// Match groups formed.
    pub groups: usize,
    /// Records resolved as members of a group, including not-yet-aged ones.
    pub grouped: usize,
    /// Records resolved with `no_match`.
    pub unmatched: usize,
}

/// Run one pass at time `now`.
pub fn process_batch<T: Clone>(
    queue: &mut EventQueue<T>,
    now: Instant,
    config: &MatcherConfig,
    distance: &dyn GeoDistance,
) -> Result<BatchSummary, BatchError> {
    let mut summary = BatchSummary::default();
    let Some(cutoff) = now.checked_sub(config.max_request_skew) else {
        return Ok(summary);
    };
    let max_clock_skew = config.max_clock_skew_ms();

    let aged = queue.aged_prefix_len(cutoff);
    for i in 0..aged {
        let Some(anchor) = queue.get(i) else { break };
        if anchor.is_matched() {
            continue;
        }
        let anchor_time = anchor.event_time();
        let anchor_location = anchor.location();

        let mut members = vec![i];
        for j in (i + 1)..queue.len() {
            let Some(other) = queue.get(j) else { break };
            if !other.is_matched()
                && anchor_time.abs_diff(other.event_time()) <= max_clock_skew
                && distance.meters(anchor_location, other.location()) < config.max_distance
            {
                members.push(j);
            }
        }

        if members.len() == 1 {
            resolve(queue, i, Err(MatchError::NoMatch))?;
            summary.unmatched += 1;
            continue;
        }

        let token = Uuid::new_v4();
        let data: Vec<T> = members
            .iter()
            .filter_map(|&m| queue.get(m).and_then(|record| record.payload().cloned()))
            .collect();
        debug!(
            %token,
            members = members.len(),
            payloads = data.len(),
            "Formed match group"
        );

        for &m in &members {
            if let Some(record) = queue.get_mut(m) {
                record.mark_matched();
            }
            resolve(
                queue,
                m,
                Ok(MatchOutcome {
                    token,
                    data: data.clone(),
                }),
            )?;
        }
        summary.groups += 1;
        summary.grouped += members.len();
    }

    queue.drain_prefix(aged)?;
    summary.finalized = aged;
    Ok(summary)
}

fn resolve<T>(
    queue: &mut EventQueue<T>,
    index: usize,
    result: Result<MatchOutcome<T>, MatchError>,
) -> Result<(), BatchError> {
    let Some(record) = queue.get_mut(index) else {
        return Ok(());
    };
    match record.resolve(result) {
        Ok(true) => Ok(()),
        Ok(false) => {
            debug!(index, "Submitter stopped waiting before its outcome was ready");
            Ok(())
        }
        Err(source) => {
            error!(index, "Outcome resolved twice");
            Err(BatchError::DoubleResolution { index, source })
        }
    }
}
