// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work queue entity (C4).
//!
//! A queue owns an ordered list of pending tasks and an append-only
//! history of finished tasks. Average item duration and SLA-failure
//! fraction are both derived from that history (§4.4).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::credential::UserId;
use crate::task::{FinishedTask, PendingTask};

crate::define_id! {
    /// Unique identifier for a work queue.
    pub struct QueueId("que-");
}

/// The 3-minute fallback used when a queue has no finished-task history
/// yet (§3 Real-capacity).
pub const FALLBACK_ITEM_DURATION: Duration = Duration::from_secs(180);

/// Configurable resourcing parameters for a queue (§3 Queue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueParams {
    pub min_resources: u32,
    pub max_resources: Option<u32>,
    pub force_max: bool,
    pub must_run: bool,
}

impl Default for QueueParams {
    fn default() -> Self {
        Self { min_resources: 0, max_resources: None, force_max: false, must_run: false }
    }
}

/// A named bucket of pending work owned by a user credential (§3 Queue).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Queue {
    pub id: QueueId,
    pub display_name: String,
    pub owner: UserId,
    pub pending: Vec<PendingTask>,
    pub finished: Vec<FinishedTask>,
    pub avg_setup: Duration,
    pub sla: Duration,
    pub criticality: i32,
    pub params: QueueParams,
}

impl Queue {
    pub fn new(
        id: QueueId,
        display_name: impl Into<String>,
        owner: UserId,
        avg_setup: Duration,
        sla: Duration,
        criticality: i32,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            owner,
            pending: Vec::new(),
            finished: Vec::new(),
            avg_setup,
            sla,
            criticality,
            params: QueueParams::default(),
        }
    }

    pub fn with_params(mut self, params: QueueParams) -> Self {
        self.params = params;
        self
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn finished_count(&self) -> usize {
        self.finished.len()
    }

    /// Distinct priorities present in `pending`, ascending (used by the
    /// Populator, C7).
    pub fn distinct_priorities(&self) -> Vec<i32> {
        let mut priorities: Vec<i32> = self.pending.iter().map(|t| t.priority).collect();
        priorities.sort_unstable();
        priorities.dedup();
        priorities
    }

    pub fn pending_count_at_priority(&self, priority: i32) -> usize {
        self.pending.iter().filter(|t| t.priority == priority).count()
    }

    /// Mean of `work_time + attempt_work_time` across `finished`, or the
    /// 3-minute fallback if there is no history yet (§4.3, §3
    /// Real-capacity).
    pub fn avg_item_duration(&self) -> Duration {
        if self.finished.is_empty() {
            return FALLBACK_ITEM_DURATION;
        }
        let total: Duration = self.finished.iter().map(FinishedTask::work_time).sum();
        total / self.finished.len() as u32
    }

    /// Fraction of finished tasks whose `completed - loaded > sla` (§4.4),
    /// or `0.0` if there is no history.
    pub fn failure_fraction(&self) -> f64 {
        if self.finished.is_empty() {
            return 0.0;
        }
        let breaches = self.finished.iter().filter(|f| f.breached_sla(self.sla)).count();
        breaches as f64 / self.finished.len() as f64
    }

    /// Invariant I1 helper: whether `task` actually belongs to this queue.
    pub fn owns(&self, task: &PendingTask) -> bool {
        task.queue_id == self.id
    }

    /// Deep-clone contract (I7).
    pub fn deep_clone(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
