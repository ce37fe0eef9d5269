// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observability snapshot (SPEC_FULL §4.14, §6): published after every
//! tick for external consumers.

use std::collections::VecDeque;

use rpasim_core::{AgentId, QueueId, SimInstant};
use serde::{Deserialize, Serialize};

use crate::state::{SimAgentState, SimState};

/// Maximum number of recent event-log lines retained in a snapshot.
/// Grounded on `tracing_appender`'s rolling-buffer idiom; implemented as
/// a fixed-capacity ring since a file appender is out of scope here.
pub const EVENT_LOG_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub id: AgentId,
    pub display_name: String,
    pub state_label: String,
    pub current_queue: Option<QueueId>,
    pub current_user: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueSummary {
    pub id: QueueId,
    pub pending_count: usize,
    pub completed_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub now: SimInstant,
    pub agents: Vec<AgentSummary>,
    pub queues: Vec<QueueSummary>,
    pub completed_per_hour: f64,
    pub utilization_pct: f64,
    pub is_finished: bool,
    pub event_log: Vec<String>,
}

/// A bounded ring buffer of recent event-log lines, fed into every
/// [`Snapshot`] produced afterward.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    lines: VecDeque<String>,
}

impl EventLog {
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == EVENT_LOG_CAPACITY {
            self.lines.pop_front();
        }
        self.lines.push_back(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

fn state_label(state: &SimAgentState) -> &'static str {
    match state {
        SimAgentState::LoggedOut => "logged_out",
        SimAgentState::LoggingIn { .. } => "logging_in",
        SimAgentState::Idle { .. } => "idle",
        SimAgentState::LoggingOut { .. } => "logging_out",
        SimAgentState::SettingUpQueue { .. } => "setting_up_queue",
        SimAgentState::Working { .. } => "working",
    }
}

/// Build a snapshot from the current state and elapsed simulated time,
/// used to derive `completed_per_hour` and `utilization_pct` (§6).
pub fn build(state: &SimState, now: SimInstant, is_finished: bool, event_log: &EventLog) -> Snapshot {
    let agents = state
        .agents
        .iter()
        .map(|a| AgentSummary {
            id: a.id,
            display_name: a.display_name.clone(),
            state_label: state_label(&a.state).to_string(),
            current_queue: a.state.current_queue().copied(),
            current_user: a.state.current_user().map(|u| u.to_string()),
        })
        .collect();

    let queues: Vec<QueueSummary> = state
        .queues
        .iter()
        .map(|q| QueueSummary { id: q.id, pending_count: q.pending_count(), completed_count: q.finished_count() })
        .collect();

    let total_completed: usize = queues.iter().map(|q| q.completed_count).sum();
    let hours_elapsed = (now.0 as f64 / 3_600_000.0).max(1.0 / 3600.0);
    let completed_per_hour = total_completed as f64 / hours_elapsed;

    let active_count = state.agents.iter().filter(|a| !a.state.is_stable()).count();
    let utilization_pct = if state.agents.is_empty() {
        0.0
    } else {
        100.0 * active_count as f64 / state.agents.len() as f64
    };

    Snapshot {
        now,
        agents,
        queues,
        completed_per_hour,
        utilization_pct,
        is_finished,
        event_log: event_log.lines(),
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
