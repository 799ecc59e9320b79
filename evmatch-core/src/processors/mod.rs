//! Processing stages of the matcher.
//!
//! - `batch`: one finalization pass over the queue
//! - `MatchScheduler`: runs passes on a fixed cadence

pub mod batch;
pub mod match_scheduler;

pub use batch::{BatchError, BatchSummary, process_batch};
pub use match_scheduler::MatchScheduler;
