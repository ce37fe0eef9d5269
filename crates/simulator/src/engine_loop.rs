// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulator Engine tick loop (C12, §4.9) and the external control
//! surface (§6): Start, Pause, Resume, Reset, SetSpeed.

use rpasim_core::{ConfigError, PendingTask, SimClock, SimInstant};
use tracing::{info, instrument, warn};

use crate::config::SimConfig;
use crate::error::SimError;
use crate::event_queue::EventQueue;
use crate::snapshot::{self, EventLog, Snapshot};
use crate::state::SimState;
use crate::worker::Worker;

/// A batch of tasks to append to their owning queues at a given
/// simulated instant (§6: "ordered list of scheduled task waves").
#[derive(Debug, Clone)]
pub struct TaskWave {
    pub at: SimInstant,
    pub tasks: Vec<PendingTask>,
}

/// Run state of the live tick loop's control surface (§6, §5 cancellation).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Paused,
}

/// The live Simulator Engine: owns the clock, state, event queue, and
/// worker, and drives them forward one tick at a time (§4.9).
pub struct Simulator {
    state: SimState,
    clock: SimClock,
    event_queue: EventQueue,
    worker: Worker,
    config: SimConfig,
    task_waves: Vec<TaskWave>,
    wave_cursor: usize,
    event_log: EventLog,
    run_state: RunState,
    last_applied: Option<SimInstant>,
}

impl Simulator {
    /// Construct a new simulator, validating `config` up front (§7 kind
    /// 1: configuration errors are surfaced at validation time, never at
    /// tick time). `task_waves` must be sorted by `at` ascending (§6) —
    /// callers building them from a scenario file are expected to sort
    /// once up front.
    pub fn new(state: SimState, config: SimConfig, task_waves: Vec<TaskWave>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state,
            clock: SimClock::new(),
            event_queue: EventQueue::new(),
            worker: Worker::new(),
            config,
            task_waves,
            wave_cursor: 0,
            event_log: EventLog::default(),
            run_state: RunState::Paused,
            last_applied: None,
        })
    }

    pub fn now(&self) -> SimInstant {
        self.clock.now()
    }

    pub fn start(&mut self) {
        self.run_state = RunState::Running;
        info!("simulator started");
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
        info!("simulator paused");
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
        info!("simulator resumed");
    }

    /// Reset to a fresh initial state, discarding the clock, event
    /// queue, and wave cursor (§6).
    pub fn reset(&mut self, state: SimState, task_waves: Vec<TaskWave>) {
        self.state = state;
        self.clock = SimClock::new();
        self.event_queue = EventQueue::new();
        self.worker = Worker::new();
        self.task_waves = task_waves;
        self.wave_cursor = 0;
        self.event_log = EventLog::default();
        self.run_state = RunState::Paused;
        self.last_applied = None;
    }

    pub fn set_speed(&mut self, multiplier: f64) -> Result<(), SimError> {
        if multiplier < 0.0 {
            return Err(SimError::DecisionFailed("speed_multiplier must be >= 0".to_string()));
        }
        self.config.speed_multiplier = multiplier;
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Live-mode termination (§4.9): event queue empty, no scheduled
    /// wave left to inject, and every queue fully drained.
    pub fn is_finished(&self) -> bool {
        self.event_queue.is_empty()
            && self.wave_cursor >= self.task_waves.len()
            && self.state.queues.iter().all(|q| q.pending.is_empty())
    }

    fn inject_due_waves(&mut self, now: SimInstant) {
        while self.wave_cursor < self.task_waves.len() && self.task_waves[self.wave_cursor].at <= now {
            let wave = &self.task_waves[self.wave_cursor];
            for task in &wave.tasks {
                if let Some(queue) = self.state.queue_mut(task.queue_id) {
                    queue.pending.push(task.clone());
                }
            }
            self.event_log.push(format!("{now}: injected task wave ({} tasks)", wave.tasks.len()));
            self.wave_cursor += 1;
        }
    }

    /// Advance one tick (§4.9): advance the clock, drain all event
    /// batches due by `now` in non-decreasing timestamp order, then let
    /// the worker observe.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Result<Snapshot, SimError> {
        self.clock.advance(self.config.step);
        let now = self.clock.now();
        self.inject_due_waves(now);

        while let Some(ts) = self.event_queue.next_timestamp() {
            if ts > now {
                break;
            }
            if let Some(last) = self.last_applied {
                if ts < last {
                    return Err(SimError::EventOrderingViolation {
                        event: ts.to_string(),
                        clock: last.to_string(),
                    });
                }
            }
            let batch = self.event_queue.pop_batch()?;
            for event in &batch {
                event.apply(&mut self.state, &mut self.event_queue)?;
                self.event_log.push(format!("{now}: {event:?}"));
            }
            self.last_applied = Some(ts);
        }

        if let Err(err) = self.worker.observe(&mut self.state, now, &mut self.event_queue, &self.config) {
            warn!(%err, "observer failed during tick");
            return Err(err);
        }

        let finished = self.is_finished();
        if finished {
            self.run_state = RunState::Paused;
        }
        Ok(snapshot::build(&self.state, now, finished, &self.event_log))
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn event_queue(&self) -> &EventQueue {
        &self.event_queue
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Deep-clone contract (I7) — used by the forecast runner to branch
    /// off the live state without sharing any mutable data.
    pub fn deep_clone(&self) -> (SimState, SimClock, EventQueue, SimConfig) {
        (self.state.deep_clone(), self.clock.deep_clone(), self.event_queue.deep_clone(), self.config)
    }
}

#[cfg(test)]
#[path = "engine_loop_tests.rs"]
mod tests;
