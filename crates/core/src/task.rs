// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending and finished task records (C4).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::agent::AgentId;
use crate::clock::SimInstant;
use crate::queue::QueueId;

crate::define_id! {
    /// Unique identifier for a pending task (work item).
    pub struct TaskId("tsk-");
}

crate::define_id! {
    /// Unique identifier for a finished-task record.
    pub struct FinishedTaskId("fin-");
}

/// A unit of work pending in a queue (§3 Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTask {
    pub id: TaskId,
    pub queue_id: QueueId,
    pub created_at: SimInstant,
    pub sla_deadline: SimInstant,
    /// Lower value = higher priority. Defaults to 1 (spec §9: "if
    /// priorities are not declared per task, use a single priority level
    /// of 1").
    pub priority: i32,
}

impl PendingTask {
    pub fn new(id: TaskId, queue_id: QueueId, created_at: SimInstant, sla_deadline: SimInstant) -> Self {
        Self { id, queue_id, created_at, sla_deadline, priority: Self::DEFAULT_PRIORITY }
    }

    pub const DEFAULT_PRIORITY: i32 = 1;

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A completed task record, retained append-only in the owning queue's
/// history (§3 Finished Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedTask {
    pub id: FinishedTaskId,
    pub queue_id: QueueId,
    pub agent_id: AgentId,
    pub completed_at: SimInstant,
    pub duration: Duration,
    /// When the task was originally loaded into the queue — needed to
    /// compute SLA-failure fraction (§4.4: `finished - loaded > SLA`).
    pub loaded_at: SimInstant,
}

impl FinishedTask {
    /// §4.4 failure condition for a single finished record.
    pub fn breached_sla(&self, sla: Duration) -> bool {
        self.completed_at.saturating_sub(self.loaded_at) > sla
    }

    /// §4.3 claim-and-schedule: `work_time + attempt_work_time`, simplified
    /// here to the stored `duration` since this crate doesn't model
    /// separate retry attempts.
    pub fn work_time(&self) -> Duration {
        self.duration
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
