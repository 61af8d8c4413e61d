//! `EventQueue`: chronological event queue with stable tie-breaking.
//!
//! The log builder replays events in timestamp order and, while doing so,
//! may need to insert synthetic stops it discovers mid-replay.  Instead of
//! inserting into the list being iterated, it pushes them here; the queue
//! always yields the earliest event next.
//!
//! Keys are `(timestamp, insertion sequence)`, so events with equal
//! timestamps come out in the order they were pushed.  `BTreeMap` gives
//! O(log n) push and pop; trips have tens of events, so the constant is
//! irrelevant.

use std::collections::BTreeMap;

use hos_core::Timestamp;

use crate::DutyEvent;

/// A priority queue of [`DutyEvent`]s ordered by `(timestamp, push order)`.
#[derive(Default, Debug)]
pub struct EventQueue {
    inner:    BTreeMap<(Timestamp, u64), DutyEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue every event in iteration order.
    pub fn from_events<I: IntoIterator<Item = DutyEvent>>(events: I) -> Self {
        let mut queue = Self::new();
        for event in events {
            queue.push(event);
        }
        queue
    }

    pub fn push(&mut self, event: DutyEvent) {
        self.inner.insert((event.timestamp, self.next_seq), event);
        self.next_seq += 1;
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<DutyEvent> {
        self.inner.pop_first().map(|(_, event)| event)
    }

    /// The earliest event, without removing it.
    pub fn peek(&self) -> Option<&DutyEvent> {
        self.inner.first_key_value().map(|(_, event)| event)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
