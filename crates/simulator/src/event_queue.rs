// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-ordered event multimap (C2, §4.1).

use std::collections::BTreeMap;

use rpasim_core::SimInstant;

use crate::error::SimError;
use crate::event::Event;

/// Timestamp → ordered list of events scheduled for that instant.
/// Events sharing a timestamp are retrieved atomically via [`pop_batch`]
/// and within a batch, insertion order is preserved (§4.1).
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    by_time: BTreeMap<SimInstant, Vec<Event>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { by_time: BTreeMap::new() }
    }

    pub fn schedule(&mut self, event: Event) {
        self.by_time.entry(event.timestamp()).or_default().push(event);
    }

    /// Earliest scheduled timestamp, or `None` if empty.
    pub fn next_timestamp(&self) -> Option<SimInstant> {
        self.by_time.keys().next().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_time.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_time.values().map(Vec::len).sum()
    }

    /// Remove and return all events at the earliest timestamp (P7):
    /// every returned event shares one timestamp, and the queue's new
    /// `next_timestamp` (if any) is strictly greater.
    pub fn pop_batch(&mut self) -> Result<Vec<Event>, SimError> {
        let Some((&ts, _)) = self.by_time.iter().next() else {
            return Err(SimError::BatchMissing);
        };
        let batch = self.by_time.remove(&ts).unwrap_or_default();
        Ok(batch)
    }

    pub fn clear(&mut self) {
        self.by_time.clear();
    }

    /// Deep-clone contract (I7) — forecasts clone the live event queue.
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
#[path = "event_queue_tests.rs"]
mod tests;
