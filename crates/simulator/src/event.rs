// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event variants and their state transitions (C3, §4.2).

use rpasim_core::{AgentId, FinishedTask, QueueId, SimInstant, TaskId, UserId};
use serde::{Deserialize, Serialize};

use crate::claim;
use crate::error::SimError;
use crate::event_queue::EventQueue;
use crate::state::{SimAgentState, SimState};

/// A scheduled state transition. `apply` is the sole mutator of
/// [`SimState`] (§4.2): nothing else in the simulator writes to agent or
/// queue state directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Event {
    LoginDone { agent: AgentId, user: UserId, timestamp: SimInstant },
    LogoutDone { agent: AgentId, timestamp: SimInstant },
    SetupDone { agent: AgentId, queue: QueueId, timestamp: SimInstant },
    ItemDone { agent: AgentId, item: TaskId, queue: QueueId, timestamp: SimInstant },
}

impl Event {
    pub fn timestamp(&self) -> SimInstant {
        match self {
            Event::LoginDone { timestamp, .. }
            | Event::LogoutDone { timestamp, .. }
            | Event::SetupDone { timestamp, .. }
            | Event::ItemDone { timestamp, .. } => *timestamp,
        }
    }

    pub fn agent_id(&self) -> AgentId {
        match self {
            Event::LoginDone { agent, .. }
            | Event::LogoutDone { agent, .. }
            | Event::SetupDone { agent, .. }
            | Event::ItemDone { agent, .. } => *agent,
        }
    }

    /// Apply this event's transition to `state`, scheduling any
    /// successor events on `event_queue` (§4.2).
    pub fn apply(&self, state: &mut SimState, event_queue: &mut EventQueue) -> Result<(), SimError> {
        match self {
            Event::LoginDone { agent, user, .. } => {
                let agent_ref = state
                    .agent_mut(*agent)
                    .ok_or_else(|| SimError::ReferenceMissing(agent.to_string()))?;
                agent_ref.state = SimAgentState::Idle { user: user.clone() };
                Ok(())
            }
            Event::LogoutDone { agent, .. } => {
                let agent_ref = state
                    .agent_mut(*agent)
                    .ok_or_else(|| SimError::ReferenceMissing(agent.to_string()))?;
                agent_ref.state = SimAgentState::LoggedOut;
                Ok(())
            }
            Event::SetupDone { agent, queue, timestamp } => {
                let user = {
                    let queue_ref = state
                        .queue(*queue)
                        .ok_or_else(|| SimError::ReferenceMissing(queue.to_string()))?;
                    queue_ref.owner.clone()
                };
                let agent_ref = state
                    .agent_mut(*agent)
                    .ok_or_else(|| SimError::ReferenceMissing(agent.to_string()))?;
                agent_ref.state = SimAgentState::Working { user, queue: *queue };
                agent_ref.process_enabled = true;
                claim::claim_and_schedule(state, *agent, *queue, *timestamp, event_queue)
            }
            Event::ItemDone { agent, item, queue, timestamp } => {
                let queue_ref = state
                    .queue_mut(*queue)
                    .ok_or_else(|| SimError::ReferenceMissing(queue.to_string()))?;
                queue_ref.pending.retain(|t| t.id != *item);

                let last_start = state
                    .agent(*agent)
                    .and_then(|a| a.last_item_start)
                    .unwrap_or(*timestamp);
                let finished = FinishedTask {
                    id: rpasim_core::FinishedTaskId::new(),
                    queue_id: *queue,
                    agent_id: *agent,
                    completed_at: *timestamp,
                    duration: timestamp.saturating_sub(last_start),
                    loaded_at: last_start,
                };
                state
                    .queue_mut(*queue)
                    .ok_or_else(|| SimError::ReferenceMissing(queue.to_string()))?
                    .finished
                    .push(finished);

                let (process_enabled, pending_nonempty, user) = {
                    let agent_ref = state
                        .agent_mut(*agent)
                        .ok_or_else(|| SimError::ReferenceMissing(agent.to_string()))?;
                    agent_ref.current_item = None;
                    agent_ref.last_item_start = None;
                    let user = agent_ref.state.current_user().cloned();
                    let pending_nonempty =
                        state.queue(*queue).map(|q| !q.pending.is_empty()).unwrap_or(false);
                    (agent_ref.process_enabled, pending_nonempty, user)
                };

                if process_enabled && pending_nonempty {
                    claim::claim_and_schedule(state, *agent, *queue, *timestamp, event_queue)
                } else {
                    let agent_ref = state
                        .agent_mut(*agent)
                        .ok_or_else(|| SimError::ReferenceMissing(agent.to_string()))?;
                    if let Some(user) = user {
                        agent_ref.state = SimAgentState::Idle { user };
                    } else {
                        agent_ref.state = SimAgentState::LoggedOut;
                    }
                    agent_ref.process_enabled = false;
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
