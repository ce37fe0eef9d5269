// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use rpasim_core::{AgentId, PendingTask, Queue, QueueId, SimInstant, TaskId, UserId};

use super::*;
use crate::state::SimAgent;

fn queue_with_one_pending() -> Queue {
    let qid = QueueId::new();
    let mut queue =
        Queue::new(qid, "q", UserId::new("u1"), Duration::from_secs(60), Duration::from_secs(120), 1);
    queue.pending.push(PendingTask::new(TaskId::new(), qid, SimInstant::ZERO, SimInstant(1000)));
    queue
}

fn working_agent(queue_id: QueueId) -> SimAgent {
    let mut agent = SimAgent::new(AgentId::new(), "a", Duration::from_secs(30), Duration::from_secs(20));
    agent.state = SimAgentState::Working { user: UserId::new("u1"), queue: queue_id };
    agent.process_enabled = true;
    agent
}

#[test]
fn claims_the_first_unclaimed_item_and_schedules_item_done() {
    let queue = queue_with_one_pending();
    let item_id = queue.pending[0].id;
    let agent = working_agent(queue.id);
    let agent_id = agent.id;
    let mut state = SimState::new(vec![agent], vec![queue]);
    let mut events = EventQueue::new();

    claim_and_schedule(&mut state, agent_id, state.queues[0].id, SimInstant(0), &mut events).unwrap();

    let agent = state.agent(agent_id).unwrap();
    assert_eq!(agent.current_item, Some(item_id));
    assert_eq!(agent.last_item_start, Some(SimInstant(0)));
    assert_eq!(events.len(), 1);
}

#[test]
fn no_unclaimed_items_moves_agent_to_idle_and_disables_processing() {
    let mut queue = queue_with_one_pending();
    let item_id = queue.pending[0].id;
    let mut agent = working_agent(queue.id);
    agent.current_item = Some(item_id); // already claimed by this same agent
    let agent_id = agent.id;
    let queue_id = queue.id;

    // a second, unrelated agent also claims it to simulate contention on
    // the only pending item.
    let mut other = working_agent(queue_id);
    other.current_item = Some(item_id);

    let mut state = SimState::new(vec![agent, other], vec![queue]);
    let mut events = EventQueue::new();

    claim_and_schedule(&mut state, agent_id, queue_id, SimInstant(0), &mut events).unwrap();

    let agent = state.agent(agent_id).unwrap();
    assert!(!agent.process_enabled);
    assert!(agent.state.is_stable());
}

#[test]
fn s2_two_agents_same_batch_claim_distinct_items() {
    let qid = QueueId::new();
    let mut queue =
        Queue::new(qid, "q", UserId::new("u1"), Duration::from_secs(60), Duration::from_secs(120), 1);
    let t1 = TaskId::new();
    let t2 = TaskId::new();
    queue.pending.push(PendingTask::new(t1, qid, SimInstant::ZERO, SimInstant(1000)));
    queue.pending.push(PendingTask::new(t2, qid, SimInstant::ZERO, SimInstant(1000)));

    let a = working_agent(qid);
    let b = working_agent(qid);
    let a_id = a.id;
    let b_id = b.id;
    let mut state = SimState::new(vec![a, b], vec![queue]);
    let mut events = EventQueue::new();

    claim_and_schedule(&mut state, a_id, qid, SimInstant(0), &mut events).unwrap();
    claim_and_schedule(&mut state, b_id, qid, SimInstant(0), &mut events).unwrap();

    let claimed_a = state.agent(a_id).unwrap().current_item;
    let claimed_b = state.agent(b_id).unwrap().current_item;
    assert_ne!(claimed_a, claimed_b);
    assert!(claimed_a.is_some() && claimed_b.is_some());
}
