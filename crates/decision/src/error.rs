// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors from the decision-engine entry point (§6, §7 kind 1).
///
/// None of the pure §4.4–§4.7 operations are fallible given well-formed
/// input; this enum exists for the same reason `rpasim_core::ConfigError`
/// and the planned `rpasim_simulator::SimError` do — one error type per
/// crate — and is only ever constructed by input validation in
/// [`crate::engine::decide`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid decision horizon: {0:?}")]
    InvalidHorizon(std::time::Duration),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
