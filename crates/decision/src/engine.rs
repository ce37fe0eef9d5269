// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Decision-engine entry point (§4.7 `decide`, §6, C10).

use std::collections::HashMap;
use std::time::Duration;

use rpasim_core::{Agent, AgentId, Command, Queue, QueueId, ResourceState};
use tracing::{debug, instrument};

use crate::error::EngineError;
use crate::populator;
use crate::selector;

/// One selected assignment: the agent (identified by id, with the
/// resource-state snapshot the engine reasoned from) and the ordered
/// setup commands needed to reach its selected queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub agent_id: AgentId,
    pub agent_state: ResourceState,
    pub queue_id: QueueId,
    pub commands: Vec<Command>,
}

/// Decide which agents should work which queues next (§6 Decision-engine
/// entry point).
///
/// Pure function: `agents` and `queues` are read-only snapshots; nothing
/// here mutates simulator state. Orchestrates Populate (§4.5) →
/// greedy-Select-with-redistribution (§4.6, §4.7) → command translation.
#[instrument(skip(agents, queues), fields(agents = agents.len(), queues = queues.len()))]
pub fn decide(
    agents: &[Agent],
    queues: &[Queue],
    horizon: Duration,
    bias: f64,
) -> Result<Vec<Assignment>, EngineError> {
    if horizon.is_zero() {
        return Err(EngineError::InvalidHorizon(horizon));
    }

    let candidates = populator::populate(agents, queues, horizon);
    debug!(candidate_count = candidates.len(), "populated candidates");

    let selected = selector::select(candidates, bias);
    debug!(selected_count = selected.len(), "selection complete");

    let queues_by_id: HashMap<QueueId, &Queue> = queues.iter().map(|q| (q.id, q)).collect();

    let mut assignments = Vec::with_capacity(selected.len());
    for candidate in selected {
        let Some(queue) = queues_by_id.get(&candidate.queue_id) else {
            continue;
        };
        let commands = candidate.agent_state.commands_for(queue);
        assignments.push(Assignment {
            agent_id: candidate.agent_id,
            agent_state: candidate.agent_state,
            queue_id: candidate.queue_id,
            commands,
        });
    }

    Ok(assignments)
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
