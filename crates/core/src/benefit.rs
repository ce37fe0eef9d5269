// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Benefit sum type (C6).
//!
//! `Infinite` is a distinct variant, not a sentinel float (spec §9:
//! "do not encode 'infinite' as a sentinel float — equality and ordering
//! of Infinite values must not be sensitive to representation").

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Scalar benefit used to rank decision-engine candidates. Totally
/// ordered: `Infinite` beats every `Finite`, and two `Infinite`s compare
/// equal regardless of how they were produced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Benefit {
    Finite(f64),
    Infinite,
}

impl Benefit {
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            Benefit::Finite(v) => Some(*v),
            Benefit::Infinite => None,
        }
    }
}

impl PartialEq for Benefit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Benefit {}

impl PartialOrd for Benefit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Benefit {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Benefit::Infinite, Benefit::Infinite) => Ordering::Equal,
            (Benefit::Infinite, Benefit::Finite(_)) => Ordering::Greater,
            (Benefit::Finite(_), Benefit::Infinite) => Ordering::Less,
            (Benefit::Finite(a), Benefit::Finite(b)) => {
                // NaN never reaches a Benefit: every producer in this crate
                // derives Finite values from capacities, weights, and
                // priorities that are always finite.
                debug_assert!(a.is_finite() && b.is_finite());
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
        }
    }
}

impl std::fmt::Display for Benefit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Benefit::Finite(v) => write!(f, "{v:.3}"),
            Benefit::Infinite => write!(f, "infinite"),
        }
    }
}

#[cfg(test)]
#[path = "benefit_tests.rs"]
mod tests;
