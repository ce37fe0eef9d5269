// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Greedy iterated arg-max selector (§4.7, C9).

use std::collections::HashMap;

use rpasim_core::QueueId;

use crate::benefit_model;
use crate::candidate::Candidate;
use crate::redistributor::redistribute;

/// Run the greedy selection loop: redistribute, pick the current arg-max
/// candidate by benefit (ties broken by `(must_run, criticality,
/// shorter-SLA)`), decrement same-priority same-queue siblings by the
/// winner's task count, repeat until candidates are exhausted.
///
/// The loop always terminates (P4): each iteration removes exactly one
/// candidate from `candidates`, so it runs at most `candidates.len()`
/// outer-loop iterations.
pub fn select(mut candidates: Vec<Candidate>, bias: f64) -> Vec<Candidate> {
    let mut assigned: HashMap<QueueId, u32> = HashMap::new();
    let mut selected = Vec::with_capacity(candidates.len());

    while !candidates.is_empty() {
        redistribute(&mut candidates);

        let keyed = |c: &Candidate| {
            let count = *assigned.get(&c.queue_id).unwrap_or(&0);
            (benefit_model::compute(c, bias, count), c.tie_break_key())
        };
        let mut best_idx = 0;
        let mut best_key = keyed(&candidates[0]);
        for (i, c) in candidates.iter().enumerate().skip(1) {
            let key = keyed(c);
            if key > best_key {
                best_key = key;
                best_idx = i;
            }
        }

        let mut best = candidates.remove(best_idx);
        let count = *assigned.get(&best.queue_id).unwrap_or(&0);
        best.benefit = benefit_model::compute(&best, bias, count);
        *assigned.entry(best.queue_id).or_insert(0) += 1;

        let winner_priority = best.priority;
        let winner_queue = best.queue_id;
        let winner_task_count = best.task_count;
        for c in candidates.iter_mut() {
            if c.priority == winner_priority && c.queue_id == winner_queue {
                c.task_count -= winner_task_count;
            }
        }

        selected.push(best);
    }

    selected
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod tests;
