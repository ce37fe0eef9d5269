// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulated clock: monotonic, explicit-advance only.
//!
//! Unlike a wall-clock system, the live tick loop and the forecast runner
//! never read real time — the clock only moves when the tick loop (or a
//! test) tells it to. A single type serves both roles; there is no
//! separate "fake" clock for tests versus a "real" one for production,
//! because production here has no real clock to begin with.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A point in simulated time, measured in milliseconds since the
/// simulation's epoch (the instant the `Simulator` was constructed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimInstant(pub u64);

impl SimInstant {
    pub const ZERO: SimInstant = SimInstant(0);

    pub fn checked_add(self, d: Duration) -> Self {
        SimInstant(self.0 + d.as_millis() as u64)
    }

    pub fn saturating_sub(self, other: SimInstant) -> Duration {
        Duration::from_millis(self.0.saturating_sub(other.0))
    }
}

impl std::fmt::Display for SimInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{}ms", self.0)
    }
}

/// Monotonic simulated clock (C1).
///
/// `advance` is the only way `now()` changes. There is no relation to
/// [`std::time::Instant`]: simulated time is purely a counter driven by
/// the tick loop.
#[derive(Clone)]
pub struct SimClock {
    now: Arc<Mutex<SimInstant>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self { now: Arc::new(Mutex::new(SimInstant::ZERO)) }
    }

    pub fn starting_at(start: SimInstant) -> Self {
        Self { now: Arc::new(Mutex::new(start)) }
    }

    pub fn now(&self) -> SimInstant {
        *self.now.lock()
    }

    /// Advance the clock by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock();
        *now = now.checked_add(step);
    }

    /// Deep-clone contract (I7): the returned clock shares no state with
    /// `self` — advancing one never affects the other.
    pub fn deep_clone(&self) -> Self {
        Self { now: Arc::new(Mutex::new(self.now())) }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
