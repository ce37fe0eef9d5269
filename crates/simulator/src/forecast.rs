// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Forecast Runner (C13, §4.12): branches off the live simulator onto a
//! background task and publishes a timeline without touching live state.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use rpasim_core::{AgentId, QueueId, SimClock, SimInstant};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::config::SimConfig;
use crate::engine_loop::TaskWave;
use crate::event_queue::EventQueue;
use crate::state::{SimAgentState, SimState};
use crate::worker::Worker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentKind {
    Login,
    Logout,
    Setup,
    Working,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSegment {
    pub agent: AgentId,
    pub start: SimInstant,
    pub end: SimInstant,
    pub kind: SegmentKind,
    pub queue: Option<QueueId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub completed_at: SimInstant,
    pub segments: Vec<TimelineSegment>,
}

type OpenSegment = (SegmentKind, SimInstant, Option<QueueId>);

fn segment_kind(state: &SimAgentState) -> Option<(SegmentKind, Option<QueueId>)> {
    match state {
        SimAgentState::LoggedOut | SimAgentState::Idle { .. } => None,
        SimAgentState::LoggingIn { .. } => Some((SegmentKind::Login, None)),
        SimAgentState::LoggingOut { .. } => Some((SegmentKind::Logout, None)),
        SimAgentState::SettingUpQueue { queue, .. } => Some((SegmentKind::Setup, Some(*queue))),
        SimAgentState::Working { queue, .. } => Some((SegmentKind::Working, Some(*queue))),
    }
}

/// Diff `state` against the previously open segments, closing any that
/// changed or ended and opening any that newly started (§4.12: "diffing
/// successive state snapshots").
fn diff_segments(
    open: &mut HashMap<AgentId, OpenSegment>,
    state: &SimState,
    now: SimInstant,
    out: &mut Vec<TimelineSegment>,
) {
    for agent in &state.agents {
        let current = segment_kind(&agent.state);
        let previous = open.get(&agent.id).copied();
        match (previous, current) {
            (Some((kind, _, queue)), Some((new_kind, new_queue))) if kind == new_kind && queue == new_queue => {
                // unchanged, still open
            }
            (Some((kind, start, queue)), new) => {
                out.push(TimelineSegment { agent: agent.id, start, end: now, kind, queue });
                if let Some((new_kind, new_queue)) = new {
                    open.insert(agent.id, (new_kind, now, new_queue));
                } else {
                    open.remove(&agent.id);
                }
            }
            (None, Some((new_kind, new_queue))) => {
                open.insert(agent.id, (new_kind, now, new_queue));
            }
            (None, None) => {}
        }
    }
}

fn close_all(open: &HashMap<AgentId, OpenSegment>, now: SimInstant, out: &mut Vec<TimelineSegment>) {
    for (&agent, &(kind, start, queue)) in open {
        out.push(TimelineSegment { agent, start, end: now, kind, queue });
    }
}

/// Run an independent tick loop on a cloned state until the forecast
/// horizon elapses, every queue drains, or cancellation fires (§4.12).
fn run_forecast(
    mut state: SimState,
    clock: SimClock,
    mut event_queue: EventQueue,
    config: SimConfig,
    mut task_waves: Vec<TaskWave>,
    cancel: CancellationToken,
) -> ForecastResult {
    let start = clock.now();
    let horizon_end = start.checked_add(config.forecast_horizon);
    let mut worker = Worker::new();
    let mut open_segments: HashMap<AgentId, OpenSegment> = HashMap::new();
    let mut segments = Vec::new();

    loop {
        if cancel.is_cancelled() {
            break;
        }
        clock.advance(config.step);
        let now = clock.now();
        if now >= horizon_end {
            break;
        }

        task_waves.retain(|wave| {
            if wave.at > now {
                return true;
            }
            for task in &wave.tasks {
                if let Some(queue) = state.queue_mut(task.queue_id) {
                    queue.pending.push(task.clone());
                }
            }
            false
        });

        while let Some(ts) = event_queue.next_timestamp() {
            if ts > now {
                break;
            }
            let Ok(batch) = event_queue.pop_batch() else { break };
            for event in &batch {
                if event.apply(&mut state, &mut event_queue).is_err() {
                    warn!("forecast event application failed, discarding event");
                }
                diff_segments(&mut open_segments, &state, now, &mut segments);
            }
        }

        if worker.observe(&mut state, now, &mut event_queue, &config).is_err() {
            warn!("forecast observer call failed");
        }
        diff_segments(&mut open_segments, &state, now, &mut segments);

        let all_drained = state.queues.iter().all(|q| q.pending.is_empty()) && event_queue.is_empty();
        if all_drained && task_waves.is_empty() {
            break;
        }
    }

    close_all(&open_segments, clock.now(), &mut segments);
    ForecastResult { completed_at: clock.now(), segments }
}

/// Owns the "latest published forecast" slot shared across the live
/// simulator and its background forecast task (§5: "an atomic reference
/// swap at the end of the forecast").
#[derive(Default)]
pub struct ForecastRunner {
    latest: Arc<Mutex<Option<ForecastResult>>>,
    cancel: Option<CancellationToken>,
}

impl ForecastRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a forecast branched off `state`/`clock`/`event_queue`
    /// (deep-cloned before handoff, per I7). Cancels any forecast
    /// already in flight first (§4.12: "at most one forecast runs at a
    /// time").
    #[instrument(skip_all)]
    pub fn start(
        &mut self,
        state: &SimState,
        clock: &SimClock,
        event_queue: &EventQueue,
        config: SimConfig,
        task_waves: Vec<TaskWave>,
    ) {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        let cancel = CancellationToken::new();
        self.cancel = Some(cancel.clone());

        let cloned_state = state.deep_clone();
        let cloned_clock = clock.deep_clone();
        let cloned_queue = event_queue.deep_clone();
        let latest = Arc::clone(&self.latest);

        info!("forecast started");
        tokio::spawn(async move {
            let result = run_forecast(cloned_state, cloned_clock, cloned_queue, config, task_waves, cancel.clone());
            if !cancel.is_cancelled() {
                *latest.lock() = Some(result);
            }
        });
    }

    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel.cancel();
        }
    }

    /// The most recently published forecast result, if any has completed.
    pub fn latest_result(&self) -> Option<ForecastResult> {
        self.latest.lock().clone()
    }
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod tests;
