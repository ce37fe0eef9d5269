// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Simulator error kinds (§7 kinds 2–4, 6).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimError {
    /// An event applied with a timestamp earlier than `clock.now()`
    /// (§7 kind 2) — a programming bug, never user-recoverable.
    #[error("event ordering violation: event timestamp {event} precedes clock {clock}")]
    EventOrderingViolation { event: String, clock: String },

    /// An event named an agent or queue absent from state (§7 kind 3).
    #[error("reference missing: {0}")]
    ReferenceMissing(String),

    /// `pop_batch` called on an empty event queue (§7 kind 4).
    #[error("pop_batch called on an empty event queue")]
    BatchMissing,

    /// An exception inside a background forecast (§7 kind 6); swallowed by
    /// the forecast runner, which retains the previous published result.
    #[error("forecast failed: {0}")]
    ForecastFailure(String),

    /// The decision engine rejected its input during a live `observe()`
    /// call (e.g. a misconfigured horizon slipping past `SimConfig::validate`).
    #[error("decision engine call failed: {0}")]
    DecisionFailed(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
