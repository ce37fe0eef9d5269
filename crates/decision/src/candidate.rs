// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Populated candidate assignment (§3 Candidate, C7).

use std::time::Duration;

use rpasim_core::{Agent, AgentId, Benefit, Queue, QueueId, ResourceState};
use serde::{Deserialize, Serialize};

/// One (agent, queue, priority) combination the Populator emitted, with
/// its task count tracked mutably by the Redistributor and Selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub agent_id: AgentId,
    /// The agent's resource-state snapshot at decision time — captured so
    /// the Selector can later derive the command sequence without
    /// re-reading the (possibly already-mutated) agent.
    pub agent_state: ResourceState,
    pub queue_id: QueueId,
    pub priority: i32,
    /// Mutated by the Redistributor (§4.6) and the Greedy Selector (§4.7).
    /// May go negative after selection — that signals saturation, not an
    /// error (spec §4.7).
    pub task_count: i64,
    pub real_capacity: i64,
    pub benefit: Benefit,
    pub must_run: bool,
    pub max_resources: Option<u32>,
    pub min_resources: u32,
    pub criticality: i32,
    pub failure_fraction: f64,
    pub sla: Duration,
}

impl Candidate {
    /// `relative_capacity = min(real_capacity / task_count, 1)` (§4.6).
    /// A non-positive `task_count` has nothing left to redistribute, so it
    /// reports full relative capacity (no further progress needed).
    pub fn relative_capacity(&self) -> f64 {
        if self.task_count <= 0 {
            return 1.0;
        }
        (self.real_capacity as f64 / self.task_count as f64).min(1.0)
    }

    pub fn is_saturated(&self) -> bool {
        self.relative_capacity() >= 1.0
    }

    /// Tie-break ordering key (§4.4): `(must_run, criticality, -sla)` so
    /// that `must_run=true` beats `false`, higher criticality wins, and a
    /// shorter SLA wins among otherwise-equal candidates.
    pub fn tie_break_key(&self) -> (bool, i32, std::cmp::Reverse<Duration>) {
        (self.must_run, self.criticality, std::cmp::Reverse(self.sla))
    }
}

/// Real-capacity (§3): `floor((horizon - overhead) / avg_item_duration)`,
/// or `0` if `horizon <= overhead`.
pub fn real_capacity(agent: &Agent, queue: &Queue, horizon: Duration) -> i64 {
    let overhead = agent.state.overhead(queue, agent.avg_login, agent.avg_logout);
    if horizon <= overhead {
        return 0;
    }
    let remaining = horizon - overhead;
    let item = queue.avg_item_duration();
    if item.is_zero() {
        return 0;
    }
    (remaining.as_secs_f64() / item.as_secs_f64()).floor() as i64
}

#[cfg(test)]
#[path = "candidate_tests.rs"]
mod tests;
