// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use rpasim_core::{AgentId, Queue, QueueId, UserId};

use super::*;
use crate::state::SimAgent;

fn idle_agent() -> SimAgent {
    let mut agent = SimAgent::new(AgentId::new(), "alice", Duration::from_secs(30), Duration::from_secs(20));
    agent.state = SimAgentState::Idle { user: UserId::new("u1") };
    agent
}

#[test]
fn event_log_drops_oldest_once_capacity_is_exceeded() {
    let mut log = EventLog::default();
    for i in 0..EVENT_LOG_CAPACITY + 10 {
        log.push(format!("line {i}"));
    }
    let lines = log.lines();
    assert_eq!(lines.len(), EVENT_LOG_CAPACITY);
    assert_eq!(lines[0], format!("line {}", 10));
}

#[test]
fn snapshot_reports_agent_and_queue_summaries() {
    let agent = idle_agent();
    let queue = Queue::new(QueueId::new(), "q", UserId::new("u1"), Duration::from_secs(60), Duration::from_secs(120), 5);
    let state = SimState::new(vec![agent], vec![queue]);
    let log = EventLog::default();

    let snapshot = build(&state, SimInstant(3_600_000), false, &log);

    assert_eq!(snapshot.agents.len(), 1);
    assert_eq!(snapshot.agents[0].state_label, "idle");
    assert_eq!(snapshot.queues.len(), 1);
    assert_eq!(snapshot.queues[0].pending_count, 0);
    assert!(!snapshot.is_finished);
}

#[test]
fn utilization_is_zero_when_every_agent_is_stable() {
    let state = SimState::new(vec![idle_agent()], vec![]);
    let log = EventLog::default();
    let snapshot = build(&state, SimInstant::ZERO, false, &log);
    assert_eq!(snapshot.utilization_pct, 0.0);
}

#[test]
fn utilization_is_nonzero_when_an_agent_is_mid_transition() {
    let mut agent = idle_agent();
    agent.state = SimAgentState::Working { user: UserId::new("u1"), queue: QueueId::new() };
    let state = SimState::new(vec![agent], vec![]);
    let log = EventLog::default();
    let snapshot = build(&state, SimInstant::ZERO, false, &log);
    assert_eq!(snapshot.utilization_pct, 100.0);
}
