// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test fixtures shared across crates (gated behind `test-support`).

use std::time::Duration;

use crate::agent::{Agent, AgentId};
use crate::clock::SimInstant;
use crate::credential::UserId;
use crate::queue::{Queue, QueueId, QueueParams};
use crate::task::{PendingTask, TaskId};

crate::builder! {
    pub struct AgentFixtureBuilder => AgentFixture {
        into { id: String = "agt-test" }
        into { name: String = "Test Agent" }
        set { avg_login: Duration = Duration::from_secs(30) }
        set { avg_logout: Duration = Duration::from_secs(20) }
    }
}

/// A ready-to-use `Agent`, logged out, for tests.
pub struct AgentFixture {
    id: String,
    name: String,
    avg_login: Duration,
    avg_logout: Duration,
}

impl AgentFixture {
    pub fn into_agent(self) -> Agent {
        Agent::new(AgentId::from_string(self.id), self.name, self.avg_login, self.avg_logout)
    }
}

/// Build a queue with `count` pending tasks at priority 1, owned by `user`.
pub fn queue_with_pending(id: &str, user: &str, count: usize, sla: Duration, criticality: i32) -> Queue {
    let qid = QueueId::from_string(id);
    let mut queue = Queue::new(
        qid.clone(),
        format!("Queue {id}"),
        UserId::new(user),
        Duration::from_secs(60),
        sla,
        criticality,
    );
    for i in 0..count {
        queue.pending.push(PendingTask::new(
            TaskId::from_string(format!("{id}-t{i}")),
            qid.clone(),
            SimInstant::ZERO,
            SimInstant::ZERO.checked_add(sla),
        ));
    }
    queue
}

pub fn must_run_queue(id: &str, user: &str, count: usize) -> Queue {
    queue_with_pending(id, user, count, Duration::from_secs(120), 1)
        .with_params(QueueParams { must_run: true, ..QueueParams::default() })
}
