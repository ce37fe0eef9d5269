// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent identifier, resource-state variants, and the `Agent` entity (C4, C5).
//!
//! [`ResourceState`] is the polymorphic state the rest of the system
//! consults through exactly two behaviors: [`ResourceState::overhead`] and
//! [`ResourceState::commands_for`] (spec §9 "Polymorphic resource states" —
//! never switch on a string, never let callers derive overhead/commands by
//! matching on the variant themselves).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::SimInstant;
use crate::queue::{Queue, QueueId};
use crate::task::TaskId;
use crate::UserId;

crate::define_id! {
    /// Unique identifier for an agent (RPA bot, human operator, or AI worker).
    pub struct AgentId("agt-");
}

/// An abstract setup command the Decision Engine emits and the simulator
/// translates into concrete operations (C9, C15).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Login,
    Logout,
    ExecuteQueue,
    /// No transition required.
    Empty,
}

crate::simple_display! {
    Command {
        Login => "login",
        Logout => "logout",
        ExecuteQueue => "execute_queue",
        Empty => "empty",
    }
}

/// Resource-state variant (C5). Each variant carries its own overhead
/// computation and command sequence for reaching a target queue — the
/// only two behaviors the rest of the system uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceState {
    LoggedOut,
    Idle {
        user: UserId,
    },
    Working {
        queue: QueueId,
        /// Owner of `queue`, so overhead can tell a same-user queue switch
        /// from a user switch without consulting the queue table again.
        queue_owner: UserId,
        /// Elapsed simulated time since the agent's current item started,
        /// needed to compute the in-flight-item drain cost.
        elapsed_since_item_start: Duration,
        /// `queue`'s own average item duration, so the in-flight-item
        /// drain cost is computed from Wq rather than from whatever
        /// queue `overhead` is asked about.
        queue_avg_item_duration: Duration,
    },
}

impl ResourceState {
    pub fn is_logged_out(&self) -> bool {
        matches!(self, ResourceState::LoggedOut)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ResourceState::Idle { .. })
    }

    pub fn is_working(&self) -> bool {
        matches!(self, ResourceState::Working { .. })
    }

    pub fn current_user(&self) -> Option<&UserId> {
        match self {
            ResourceState::Idle { user } => Some(user),
            ResourceState::Working { queue_owner, .. } => Some(queue_owner),
            ResourceState::LoggedOut => None,
        }
    }

    pub fn current_queue(&self) -> Option<&QueueId> {
        match self {
            ResourceState::Working { queue, .. } => Some(queue),
            _ => None,
        }
    }

    /// Setup overhead (§3 Resource-State Variant) to reach `target`, given
    /// this agent's average login/logout durations.
    pub fn overhead(&self, target: &Queue, avg_login: Duration, avg_logout: Duration) -> Duration {
        match self {
            ResourceState::LoggedOut => avg_login + target.avg_setup,
            ResourceState::Idle { user } => {
                if *user == target.owner {
                    target.avg_setup
                } else {
                    avg_login + avg_logout + target.avg_setup
                }
            }
            ResourceState::Working { queue, queue_owner, elapsed_since_item_start, queue_avg_item_duration } => {
                let finish_in_flight = queue_avg_item_duration.saturating_sub(*elapsed_since_item_start);
                if queue == &target.id {
                    finish_in_flight
                } else if *queue_owner == target.owner {
                    finish_in_flight + target.avg_setup
                } else {
                    finish_in_flight + target.avg_setup + avg_login + avg_logout
                }
            }
        }
    }

    /// Command sequence (§3) needed to reach `target` from this state.
    pub fn commands_for(&self, target: &Queue) -> Vec<Command> {
        match self {
            ResourceState::LoggedOut => vec![Command::Login, Command::ExecuteQueue],
            ResourceState::Idle { user } => {
                if *user == target.owner {
                    vec![Command::ExecuteQueue]
                } else {
                    vec![Command::Logout, Command::Login, Command::ExecuteQueue]
                }
            }
            ResourceState::Working { queue, queue_owner, .. } => {
                if queue == &target.id {
                    vec![Command::Empty]
                } else if *queue_owner == target.owner {
                    vec![Command::ExecuteQueue]
                } else {
                    vec![Command::Logout, Command::Login, Command::ExecuteQueue]
                }
            }
        }
    }
}

/// A robotic process automation agent, human operator, or AI worker (C4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub display_name: String,
    pub state: ResourceState,
    pub avg_login: Duration,
    pub avg_logout: Duration,
    pub current_user: Option<UserId>,
    pub current_queue: Option<QueueId>,
    pub current_item: Option<TaskId>,
    pub last_item_start: Option<SimInstant>,
    pub process_enabled: bool,
    pub stop_requested_at: Option<SimInstant>,
    pub pending_commands: Vec<Command>,
}

impl Agent {
    pub fn new(
        id: AgentId,
        display_name: impl Into<String>,
        avg_login: Duration,
        avg_logout: Duration,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            state: ResourceState::LoggedOut,
            avg_login,
            avg_logout,
            current_user: None,
            current_queue: None,
            current_item: None,
            last_item_start: None,
            process_enabled: false,
            stop_requested_at: None,
            pending_commands: Vec::new(),
        }
    }

    /// Invariant I2: a Working agent has a non-null current-queue; an Idle
    /// agent has a non-null current-user; a LoggedOut agent has neither.
    pub fn satisfies_state_invariant(&self) -> bool {
        match &self.state {
            ResourceState::LoggedOut => self.current_user.is_none() && self.current_queue.is_none(),
            ResourceState::Idle { .. } => self.current_user.is_some(),
            ResourceState::Working { .. } => self.current_queue.is_some(),
        }
    }

    /// Invariant I6: agents in a transient phase never receive new pending
    /// commands until they reach a stable state. The simulator's
    /// transient phases (LoggingIn/LoggingOut/SettingUpQueue) collapse to
    /// neither `LoggedOut` nor `Idle` at the engine-state level (§4.10),
    /// so checking the two stable variants here is sufficient.
    pub fn is_stable(&self) -> bool {
        matches!(self.state, ResourceState::LoggedOut | ResourceState::Idle { .. })
    }

    /// Deep-clone contract (I7).
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
