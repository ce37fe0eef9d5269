// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cross-product candidate expansion (§4.5, C7).

use std::time::Duration;

use rpasim_core::{Agent, Benefit, Queue};

use crate::candidate::{real_capacity, Candidate};

/// Expand `agents × queues × distinct-priority-present` into one
/// [`Candidate`] per combination. Agent/queue compatibility is always
/// true in the baseline (§4.5) — user-switching cost is already encoded
/// in the Resource-State overhead formulas.
pub fn populate(agents: &[Agent], queues: &[Queue], horizon: Duration) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for agent in agents {
        for queue in queues {
            let capacity = real_capacity(agent, queue, horizon);
            let failure_fraction = queue.failure_fraction();
            for priority in queue.distinct_priorities() {
                candidates.push(Candidate {
                    agent_id: agent.id,
                    agent_state: agent.state.clone(),
                    queue_id: queue.id,
                    priority,
                    task_count: queue.pending_count_at_priority(priority) as i64,
                    real_capacity: capacity,
                    benefit: Benefit::Finite(0.0),
                    must_run: queue.params.must_run,
                    max_resources: queue.params.max_resources,
                    min_resources: queue.params.min_resources,
                    criticality: queue.criticality,
                    failure_fraction,
                    sla: queue.sla,
                });
            }
        }
    }
    candidates
}

#[cfg(test)]
#[path = "populator_tests.rs"]
mod tests;
