// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! State Adapter (C14, §4.10): maps simulator-side state to the decision
//! engine's narrower agent/queue view.
//!
//! `rpasim_core::Queue` already holds its pending/finished tasks by
//! value rather than by pointer, so the cyclic queue↔task construction
//! the spec calls out (§4.10, §9) never arises here — each `PendingTask`
//! carries its `queue_id` rather than a reference, the "arena + indices"
//! alternative the design notes call acceptable. The adapter's real job
//! is narrower: collapsing [`SimAgentState`]'s six phases down to the
//! engine's three stable variants.

use std::time::Duration;

use rpasim_core::{Agent, Queue, SimInstant};

use crate::state::{SimAgent, SimState};

/// Build the decision engine's input snapshot from the simulator's live
/// (or forecast-clone) state, as of `now`.
pub fn adapt(state: &SimState, now: SimInstant) -> (Vec<Agent>, Vec<Queue>) {
    let queues = state.queues.iter().map(Queue::deep_clone).collect();
    let agents = state.agents.iter().map(|a| to_engine_agent(a, state, now)).collect();
    (agents, queues)
}

fn to_engine_agent(agent: &SimAgent, state: &SimState, now: SimInstant) -> Agent {
    let elapsed = agent.last_item_start.map(|start| now.saturating_sub(start)).unwrap_or(Duration::ZERO);
    let queue_avg_item_duration = agent
        .state
        .current_queue()
        .and_then(|queue_id| state.queue(*queue_id))
        .map(Queue::avg_item_duration)
        .unwrap_or(Duration::ZERO);

    let mut engine_agent = Agent::new(agent.id, agent.display_name.clone(), agent.avg_login, agent.avg_logout);
    engine_agent.state = agent.state.to_engine_variant(elapsed, queue_avg_item_duration);
    engine_agent.current_user = agent.state.current_user().cloned();
    engine_agent.current_queue = agent.state.current_queue().copied();
    engine_agent.current_item = agent.current_item;
    engine_agent.last_item_start = agent.last_item_start;
    engine_agent.process_enabled = agent.process_enabled;
    engine_agent.stop_requested_at = agent.stop_requested_at;
    engine_agent
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
