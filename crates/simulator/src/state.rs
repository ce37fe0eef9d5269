// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulator-side agent state machine and the live/forecast state store
//! (C4, C5 as seen by the simulator rather than the decision engine).
//!
//! The decision engine only ever sees three stable resource-state
//! variants (`rpasim_core::ResourceState`); the simulator additionally
//! tracks the transient phases an agent passes through while a command
//! is in flight (§4.8, §4.10).

use std::time::Duration;

use rpasim_core::{AgentId, Queue, QueueId, SimInstant, TaskId, UserId};
use serde::{Deserialize, Serialize};

/// Simulator-side resource state, richer than the decision engine's
/// three stable variants — it also models the transient phases an agent
/// passes through while a dispatched command is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimAgentState {
    LoggedOut,
    LoggingIn { user: UserId },
    Idle { user: UserId },
    LoggingOut { user: UserId },
    SettingUpQueue { user: UserId, queue: QueueId },
    Working { user: UserId, queue: QueueId },
}

impl SimAgentState {
    /// Whether the simulator may dispatch the next pending command to an
    /// agent in this state (§4.8 step 3, invariant I6): only `LoggedOut`
    /// and `Idle` are stable.
    pub fn is_stable(&self) -> bool {
        matches!(self, SimAgentState::LoggedOut | SimAgentState::Idle { .. })
    }

    pub fn current_user(&self) -> Option<&UserId> {
        match self {
            SimAgentState::LoggedOut => None,
            SimAgentState::LoggingIn { user }
            | SimAgentState::Idle { user }
            | SimAgentState::LoggingOut { user }
            | SimAgentState::SettingUpQueue { user, .. }
            | SimAgentState::Working { user, .. } => Some(user),
        }
    }

    pub fn current_queue(&self) -> Option<&QueueId> {
        match self {
            SimAgentState::SettingUpQueue { queue, .. } | SimAgentState::Working { queue, .. } => {
                Some(queue)
            }
            _ => None,
        }
    }

    /// The engine-side variant this simulator state collapses to (§4.10
    /// State Adapter table). `elapsed_since_item_start` and
    /// `current_queue_avg_item_duration` are only meaningful for
    /// `Working` and are supplied by the caller since this type has no
    /// clock or queue-table access of its own.
    pub fn to_engine_variant(
        &self,
        elapsed_since_item_start: Duration,
        current_queue_avg_item_duration: Duration,
    ) -> rpasim_core::ResourceState {
        use rpasim_core::ResourceState;
        match self {
            SimAgentState::LoggedOut | SimAgentState::LoggingIn { .. } => ResourceState::LoggedOut,
            SimAgentState::Idle { user }
            | SimAgentState::LoggingOut { user }
            | SimAgentState::SettingUpQueue { user, .. } => {
                ResourceState::Idle { user: user.clone() }
            }
            SimAgentState::Working { user, queue } => ResourceState::Working {
                queue: *queue,
                queue_owner: user.clone(),
                elapsed_since_item_start,
                queue_avg_item_duration: current_queue_avg_item_duration,
            },
        }
    }
}

/// An abstract simulator-level command the Command Translator (C15)
/// emits and the Worker (C11) dispatches (§4.8 step 3, §4.11).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimCommand {
    Login(UserId),
    Logout,
    StartProcess(QueueId),
    StopProcess,
}

/// A simulator-managed agent: the same identity/timing fields as
/// `rpasim_core::Agent`, but carrying [`SimAgentState`] and
/// [`SimCommand`] pending queue instead of the engine's narrower types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimAgent {
    pub id: AgentId,
    pub display_name: String,
    pub avg_login: Duration,
    pub avg_logout: Duration,
    pub state: SimAgentState,
    pub current_item: Option<TaskId>,
    pub last_item_start: Option<SimInstant>,
    pub process_enabled: bool,
    pub stop_requested_at: Option<SimInstant>,
    pub pending_commands: Vec<SimCommand>,
}

impl SimAgent {
    pub fn new(id: AgentId, display_name: impl Into<String>, avg_login: Duration, avg_logout: Duration) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            avg_login,
            avg_logout,
            state: SimAgentState::LoggedOut,
            current_item: None,
            last_item_start: None,
            process_enabled: false,
            stop_requested_at: None,
            pending_commands: Vec::new(),
        }
    }

    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

/// The simulator's full mutable state: agents and queues (C4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub agents: Vec<SimAgent>,
    pub queues: Vec<Queue>,
}

impl SimState {
    pub fn new(agents: Vec<SimAgent>, queues: Vec<Queue>) -> Self {
        Self { agents, queues }
    }

    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut SimAgent> {
        self.agents.iter_mut().find(|a| a.id == id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&SimAgent> {
        self.agents.iter().find(|a| a.id == id)
    }

    pub fn queue_mut(&mut self, id: QueueId) -> Option<&mut Queue> {
        self.queues.iter_mut().find(|q| q.id == id)
    }

    pub fn queue(&self, id: QueueId) -> Option<&Queue> {
        self.queues.iter().find(|q| q.id == id)
    }

    /// Ids of items currently claimed by some agent (§4.3 step 1).
    pub fn claimed_item_ids(&self) -> Vec<TaskId> {
        self.agents.iter().filter_map(|a| a.current_item).collect()
    }

    /// Deep-clone contract (I7) — the clone shares no state with `self`.
    pub fn deep_clone(&self) -> Self {
        Self {
            agents: self.agents.iter().map(SimAgent::deep_clone).collect(),
            queues: self.queues.iter().map(Queue::deep_clone).collect(),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
