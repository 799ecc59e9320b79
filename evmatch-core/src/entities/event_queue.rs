//! Bounded FIFO of pending reports.
//!
//! Records are appended at the tail and only ever removed as a prefix from
//! the head, so the queue stays ordered by arrival time.

use super::EventRecord;
use std::collections::VecDeque;
use thiserror::Error;
use tokio::time::Instant;

/// Admission was refused because the queue is full. Hands the record back.
#[derive(Debug)]
pub struct CapacityExceeded<T> {
    pub record: EventRecord<T>,
}

/// A prefix longer than the queue was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot drain {requested} records from a queue of {len}")]
pub struct DrainOutOfBounds {
    pub requested: usize,
    pub len: usize,
}

#[derive(Debug)]
pub struct EventQueue<T> {
    records: VecDeque<EventRecord<T>>,
    capacity: usize,
}

impl<T> EventQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::new(),
            capacity,
        }
    }

    /// Append `record` at the tail, unless the queue is at capacity.
    pub fn admit(&mut self, record: EventRecord<T>) -> Result<(), CapacityExceeded<T>> {
        if self.records.len() >= self.capacity {
            return Err(CapacityExceeded { record });
        }
        self.records.push_back(record);
        Ok(())
    }

    /// The leading run of records that arrived strictly before `cutoff`.
    pub fn peek_prefix_older_than(
        &self,
        cutoff: Instant,
    ) -> impl Iterator<Item = &EventRecord<T>> + '_ {
        self.records
            .iter()
            .take_while(move |record| record.arrival_time() < cutoff)
    }

    /// Length of [`peek_prefix_older_than`](Self::peek_prefix_older_than).
    pub fn aged_prefix_len(&self, cutoff: Instant) -> usize {
        self.peek_prefix_older_than(cutoff).count()
    }

    /// Remove the first `n` records.
    pub fn drain_prefix(&mut self, n: usize) -> Result<(), DrainOutOfBounds> {
        if n > self.records.len() {
            return Err(DrainOutOfBounds {
                requested: n,
                len: self.records.len(),
            });
        }
        self.records.drain(..n);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord<T>> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut EventRecord<T>> {
        self.records.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord<T>> + '_ {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Location;
    use crate::events::outcome_channel;
    use std::time::Duration;

    fn record(arrival_time: Instant, event_time: i64) -> EventRecord<&'static str> {
        let (sink, _pending) = outcome_channel();
        EventRecord::new(arrival_time, event_time, Location::new(0.0, 0.0), None, sink)
    }

    #[test]
    fn test_admit_until_capacity() {
        let now = Instant::now();
        let mut queue = EventQueue::new(2);
        assert!(queue.admit(record(now, 1)).is_ok());
        assert!(queue.admit(record(now, 2)).is_ok());

        let rejected = queue.admit(record(now, 3)).unwrap_err();
        assert_eq!(rejected.record.event_time(), 3);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.capacity(), 2);
    }

    #[test]
    fn test_prefix_stops_at_first_young_record() {
        let base = Instant::now();
        let mut queue = EventQueue::new(10);
        queue.admit(record(base, 1)).unwrap();
        queue.admit(record(base + Duration::from_millis(5), 2)).unwrap();
        queue.admit(record(base + Duration::from_millis(20), 3)).unwrap();
        queue.admit(record(base + Duration::from_millis(6), 4)).unwrap();

        let cutoff = base + Duration::from_millis(10);
        let prefix: Vec<i64> = queue
            .peek_prefix_older_than(cutoff)
            .map(EventRecord::event_time)
            .collect();
        assert_eq!(prefix, vec![1, 2]);
        assert_eq!(queue.aged_prefix_len(cutoff), 2);
        // Strictly older: a record arriving exactly at the cutoff is excluded.
        assert_eq!(queue.aged_prefix_len(base), 0);
        assert_eq!(queue.len(), 4);
    }

    #[test]
    fn test_drain_prefix() {
        let now = Instant::now();
        let mut queue = EventQueue::new(10);
        for t in 0..4 {
            queue.admit(record(now, t)).unwrap();
        }

        queue.drain_prefix(3).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.get(0).map(EventRecord::event_time), Some(3));

        assert_eq!(
            queue.drain_prefix(2),
            Err(DrainOutOfBounds {
                requested: 2,
                len: 1
            })
        );
        assert_eq!(queue.len(), 1);

        queue.drain_prefix(0).unwrap();
        queue.drain_prefix(1).unwrap();
        assert!(queue.is_empty());
    }
}
