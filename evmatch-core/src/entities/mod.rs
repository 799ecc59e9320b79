//! In-memory records held by the matcher.

pub mod event_queue;
pub mod event_record;
pub mod location;

pub use event_queue::{CapacityExceeded, DrainOutOfBounds, EventQueue};
pub use event_record::EventRecord;
pub use location::Location;
