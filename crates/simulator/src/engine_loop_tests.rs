// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use rpasim_core::{AgentId, PendingTask, Queue, QueueId, TaskId, UserId};

use super::*;
use crate::state::{SimAgent, SimAgentState};

fn cold_start_simulator(pending_count: usize) -> (Simulator, AgentId, QueueId) {
    let agent = SimAgent::new(AgentId::new(), "a", Duration::from_secs(30), Duration::from_secs(20));
    let agent_id = agent.id;
    let qid = QueueId::new();
    let mut queue =
        Queue::new(qid, "q", UserId::new("u1"), Duration::from_secs(60), Duration::from_secs(120), 5);
    for _ in 0..pending_count {
        queue.pending.push(PendingTask::new(TaskId::new(), qid, SimInstant::ZERO, SimInstant(600_000)));
    }
    let state = SimState::new(vec![agent], vec![queue]);
    let config = SimConfig {
        decision_interval: Duration::from_secs(600),
        decision_horizon: Duration::from_secs(600),
        ..SimConfig::default()
    };
    (Simulator::new(state, config, Vec::new()).unwrap(), agent_id, qid)
}

#[test]
fn p7_tick_drains_only_the_events_due_by_now() {
    let (mut sim, _agent, _queue) = cold_start_simulator(8);
    sim.start();
    let snapshot = sim.tick().unwrap();
    assert_eq!(snapshot.now, SimInstant(1_000));
}

#[test]
fn s1_single_agent_single_queue_cold_start_drains_the_queue() {
    let (mut sim, agent_id, _queue) = cold_start_simulator(8);
    sim.start();

    let mut ticks = 0;
    while !sim.is_finished() && ticks < 700 {
        sim.tick().unwrap();
        ticks += 1;
    }

    assert!(sim.is_finished(), "simulator should have drained the queue within 700 ticks");
    let agent = sim.state().agent(agent_id).unwrap();
    assert!(matches!(agent.state, SimAgentState::Idle { .. }));
    assert_eq!(sim.state().queues[0].pending.len(), 0);
    assert_eq!(sim.state().queues[0].finished.len(), 8);
}

#[test]
fn p3_logged_out_agent_has_no_current_user_or_queue() {
    let (sim, agent_id, _queue) = cold_start_simulator(0);
    let agent = sim.state().agent(agent_id).unwrap();
    assert!(matches!(agent.state, SimAgentState::LoggedOut));
    assert!(agent.state.current_user().is_none());
    assert!(agent.state.current_queue().is_none());
}

#[test]
fn l1_observe_with_no_triggers_and_no_stable_pending_is_a_noop() {
    let mut agent = SimAgent::new(AgentId::new(), "a", Duration::from_secs(30), Duration::from_secs(20));
    agent.state = SimAgentState::Idle { user: UserId::new("u1") };
    let state = SimState::new(vec![agent], vec![]);
    let config = SimConfig { decision_interval: Duration::from_secs(600), ..SimConfig::default() };
    let mut sim = Simulator::new(state, config, Vec::new()).unwrap();
    sim.start();

    sim.tick().unwrap();
    let before = sim.state().agents[0].pending_commands.clone();
    sim.tick().unwrap();
    let after = sim.state().agents[0].pending_commands.clone();

    assert_eq!(before, after);
}

#[test]
fn reset_discards_clock_and_event_queue() {
    let (mut sim, _agent, _queue) = cold_start_simulator(8);
    sim.start();
    sim.tick().unwrap();
    assert!(sim.now().0 > 0);

    let fresh_agent = SimAgent::new(AgentId::new(), "b", Duration::from_secs(10), Duration::from_secs(10));
    sim.reset(SimState::new(vec![fresh_agent], vec![]), Vec::new());

    assert_eq!(sim.now(), SimInstant::ZERO);
    assert!(sim.event_queue().is_empty());
    assert!(!sim.is_running());
}

#[test]
fn new_rejects_an_invalid_config_at_construction_instead_of_at_tick_time() {
    let agent = SimAgent::new(AgentId::new(), "a", Duration::from_secs(30), Duration::from_secs(20));
    let state = SimState::new(vec![agent], vec![]);
    let config = SimConfig { step: Duration::ZERO, ..SimConfig::default() };

    assert!(Simulator::new(state, config, Vec::new()).is_err());
}

#[test]
fn set_speed_rejects_negative_multiplier() {
    let (mut sim, _agent, _queue) = cold_start_simulator(0);
    assert!(sim.set_speed(-1.0).is_err());
    assert!(sim.set_speed(2.0).is_ok());
}

#[test]
fn task_wave_is_injected_once_its_timestamp_is_reached() {
    let (mut sim, _agent, qid) = cold_start_simulator(0);
    let wave = TaskWave {
        at: SimInstant(5_000),
        tasks: vec![PendingTask::new(TaskId::new(), qid, SimInstant(5_000), SimInstant(600_000))],
    };
    sim.reset(sim.state().deep_clone(), vec![wave]);
    sim.start();

    for _ in 0..6 {
        sim.tick().unwrap();
    }

    assert_eq!(sim.state().queues[0].pending.len(), 1);
}
