// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Benefit computation and the MustRun / Max-resources / Min-resources
//! overrides (§4.4, C6).

use rpasim_core::Benefit;

use crate::candidate::Candidate;

/// `criticality + bias * failure_fraction` (§4.4).
pub fn queue_weight(criticality: i32, bias: f64, failure_fraction: f64) -> f64 {
    criticality as f64 + bias * failure_fraction
}

/// Finite benefit before overrides: `real_capacity * queue_weight / max(priority, 1)`.
pub fn finite_benefit(candidate: &Candidate, bias: f64) -> f64 {
    let weight = queue_weight(candidate.criticality, bias, candidate.failure_fraction);
    let divisor = candidate.priority.max(1) as f64;
    candidate.real_capacity as f64 * weight / divisor
}

/// Apply the benefit formula and the three rule overrides (§4.4) to
/// `candidate`, given how many agents are already assigned to its queue
/// in the current decision run.
///
/// Overrides apply in the order the spec lists them; MustRun's Infinite
/// promotion is final (nothing outranks Infinite), so Max/Min are only
/// consulted when MustRun did not fire.
pub fn compute(candidate: &Candidate, bias: f64, already_assigned: u32) -> Benefit {
    if candidate.must_run && candidate.priority == 1 {
        return Benefit::Infinite;
    }
    if let Some(max) = candidate.max_resources {
        if already_assigned >= max {
            return Benefit::Finite(0.0);
        }
    }
    if candidate.min_resources > 0 && already_assigned < candidate.min_resources {
        return Benefit::Infinite;
    }
    Benefit::Finite(finite_benefit(candidate, bias))
}

#[cfg(test)]
#[path = "benefit_model_tests.rs"]
mod tests;
