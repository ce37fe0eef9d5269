// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::clock::SimInstant;
use std::time::Duration;

fn new_queue() -> Queue {
    Queue::new(
        QueueId::from_string("que-1"),
        "Invoices",
        UserId::new("alice"),
        Duration::from_secs(60),
        Duration::from_secs(120),
        5,
    )
}

#[test]
fn avg_item_duration_falls_back_when_no_history() {
    let q = new_queue();
    assert_eq!(q.avg_item_duration(), FALLBACK_ITEM_DURATION);
}

#[test]
fn avg_item_duration_means_the_finished_history() {
    let mut q = new_queue();
    q.finished.push(FinishedTask {
        id: FinishedTaskId::from_string("fin-1"),
        queue_id: q.id.clone(),
        agent_id: crate::agent::AgentId::from_string("agt-1"),
        completed_at: SimInstant(1000),
        duration: Duration::from_secs(30),
        loaded_at: SimInstant(0),
    });
    q.finished.push(FinishedTask {
        id: FinishedTaskId::from_string("fin-2"),
        queue_id: q.id.clone(),
        agent_id: crate::agent::AgentId::from_string("agt-1"),
        completed_at: SimInstant(2000),
        duration: Duration::from_secs(90),
        loaded_at: SimInstant(0),
    });
    assert_eq!(q.avg_item_duration(), Duration::from_secs(60));
}

#[test]
fn failure_fraction_is_zero_with_no_history() {
    let q = new_queue();
    assert_eq!(q.failure_fraction(), 0.0);
}

#[test]
fn failure_fraction_counts_sla_breaches() {
    let mut q = new_queue();
    // loaded at 0, completed at 200_000ms = 200s > sla(120s) => breach
    q.finished.push(FinishedTask {
        id: FinishedTaskId::from_string("fin-1"),
        queue_id: q.id.clone(),
        agent_id: crate::agent::AgentId::from_string("agt-1"),
        completed_at: SimInstant(200_000),
        duration: Duration::from_secs(30),
        loaded_at: SimInstant::ZERO,
    });
    q.finished.push(FinishedTask {
        id: FinishedTaskId::from_string("fin-2"),
        queue_id: q.id.clone(),
        agent_id: crate::agent::AgentId::from_string("agt-1"),
        completed_at: SimInstant(30_000),
        duration: Duration::from_secs(30),
        loaded_at: SimInstant::ZERO,
    });
    assert_eq!(q.failure_fraction(), 0.5);
}

#[test]
fn distinct_priorities_are_sorted_and_deduped() {
    let mut q = new_queue();
    for (i, prio) in [3, 1, 1, 2].into_iter().enumerate() {
        q.pending.push(
            PendingTask::new(
                TaskId::from_string(format!("tsk-{i}")),
                q.id.clone(),
                SimInstant::ZERO,
                SimInstant(1000),
            )
            .with_priority(prio),
        );
    }
    assert_eq!(q.distinct_priorities(), vec![1, 2, 3]);
}

#[test]
fn pending_count_at_priority_filters() {
    let mut q = new_queue();
    q.pending.push(
        PendingTask::new(TaskId::from_string("tsk-a"), q.id.clone(), SimInstant::ZERO, SimInstant(1000))
            .with_priority(1),
    );
    q.pending.push(
        PendingTask::new(TaskId::from_string("tsk-b"), q.id.clone(), SimInstant::ZERO, SimInstant(1000))
            .with_priority(2),
    );
    assert_eq!(q.pending_count_at_priority(1), 1);
    assert_eq!(q.pending_count_at_priority(2), 1);
    assert_eq!(q.pending_count_at_priority(3), 0);
}

#[test]
fn deep_clone_does_not_alias_pending_vec() {
    let mut q = new_queue();
    q.pending.push(PendingTask::new(
        TaskId::from_string("tsk-a"),
        q.id.clone(),
        SimInstant::ZERO,
        SimInstant(1000),
    ));
    let mut clone = q.deep_clone();
    clone.pending.clear();
    assert_eq!(q.pending.len(), 1);
    assert_eq!(clone.pending.len(), 0);
}
