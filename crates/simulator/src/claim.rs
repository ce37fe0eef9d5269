// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim-and-schedule protocol (§4.3): prevents two agents finishing
//! setup in the same event batch from claiming the same pending item.

use rpasim_core::{AgentId, QueueId, SimInstant};

use crate::error::SimError;
use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::state::{SimAgentState, SimState};

pub fn claim_and_schedule(
    state: &mut SimState,
    agent_id: AgentId,
    queue_id: QueueId,
    now: SimInstant,
    event_queue: &mut EventQueue,
) -> Result<(), SimError> {
    let claimed = state.claimed_item_ids();

    let chosen = {
        let queue = state
            .queue(queue_id)
            .ok_or_else(|| SimError::ReferenceMissing(queue_id.to_string()))?;
        queue.pending.iter().find(|t| !claimed.contains(&t.id)).map(|t| t.id)
    };

    let agent = state
        .agent_mut(agent_id)
        .ok_or_else(|| SimError::ReferenceMissing(agent_id.to_string()))?;

    let Some(item_id) = chosen else {
        let user = agent.state.current_user().cloned();
        agent.state = match user {
            Some(user) => SimAgentState::Idle { user },
            None => SimAgentState::LoggedOut,
        };
        agent.process_enabled = false;
        return Ok(());
    };

    agent.current_item = Some(item_id);
    agent.last_item_start = Some(now);

    let avg_item_duration = state
        .queue(queue_id)
        .ok_or_else(|| SimError::ReferenceMissing(queue_id.to_string()))?
        .avg_item_duration();

    event_queue.schedule(Event::ItemDone {
        agent: agent_id,
        item: item_id,
        queue: queue_id,
        timestamp: now.checked_add(avg_item_duration),
    });
    Ok(())
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
