// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON scenario loader (§6 Simulator entry point): initial agents and
//! queues, scheduled task waves, and simulator configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use rpasim_core::{AgentId, PendingTask, Queue, QueueId, QueueParams, SimInstant, TaskId, UserId};
use rpasim_simulator::{SimAgent, SimConfig, SimState, TaskWave};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Scenario {
    pub agents: Vec<AgentSpec>,
    pub queues: Vec<QueueSpec>,
    #[serde(default)]
    pub task_waves: Vec<TaskWaveSpec>,
    #[serde(default)]
    pub config: ConfigSpec,
}

#[derive(Debug, Deserialize)]
pub struct AgentSpec {
    pub display_name: String,
    pub avg_login_secs: u64,
    pub avg_logout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct QueueSpec {
    pub display_name: String,
    pub owner: String,
    pub avg_setup_secs: u64,
    pub sla_secs: u64,
    pub criticality: i32,
    #[serde(default)]
    pub pending: usize,
    #[serde(default)]
    pub min_resources: u32,
    #[serde(default)]
    pub max_resources: Option<u32>,
    #[serde(default)]
    pub must_run: bool,
}

#[derive(Debug, Deserialize)]
pub struct TaskWaveSpec {
    pub at_secs: u64,
    /// Index into `Scenario::queues` that receives the appended tasks.
    pub queue_index: usize,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ConfigSpec {
    #[serde(default = "default_step_secs")]
    pub step_secs: u64,
    #[serde(default = "default_decision_interval_secs")]
    pub decision_interval_secs: u64,
    #[serde(default = "default_decision_horizon_secs")]
    pub decision_horizon_secs: u64,
    #[serde(default = "default_forecast_horizon_secs")]
    pub forecast_horizon_secs: u64,
    #[serde(default = "default_speed_multiplier")]
    pub speed_multiplier: f64,
    #[serde(default = "default_bias")]
    pub bias: f64,
}

fn default_step_secs() -> u64 {
    1
}
fn default_decision_interval_secs() -> u64 {
    600
}
fn default_decision_horizon_secs() -> u64 {
    600
}
fn default_forecast_horizon_secs() -> u64 {
    8 * 3600
}
fn default_speed_multiplier() -> f64 {
    1.0
}
fn default_bias() -> f64 {
    0.5
}

impl Default for ConfigSpec {
    fn default() -> Self {
        Self {
            step_secs: default_step_secs(),
            decision_interval_secs: default_decision_interval_secs(),
            decision_horizon_secs: default_decision_horizon_secs(),
            forecast_horizon_secs: default_forecast_horizon_secs(),
            speed_multiplier: default_speed_multiplier(),
            bias: default_bias(),
        }
    }
}

impl From<&ConfigSpec> for SimConfig {
    fn from(spec: &ConfigSpec) -> Self {
        SimConfig {
            step: Duration::from_secs(spec.step_secs),
            decision_interval: Duration::from_secs(spec.decision_interval_secs),
            decision_horizon: Duration::from_secs(spec.decision_horizon_secs),
            forecast_horizon: Duration::from_secs(spec.forecast_horizon_secs),
            speed_multiplier: spec.speed_multiplier,
            bias: spec.bias,
        }
    }
}

/// Load and materialize a scenario file into runnable simulator inputs.
pub fn load(path: &std::path::Path) -> Result<(SimState, Vec<TaskWave>, SimConfig)> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario file {}", path.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&raw).with_context(|| format!("parsing scenario file {}", path.display()))?;
    build(scenario)
}

fn build(scenario: Scenario) -> Result<(SimState, Vec<TaskWave>, SimConfig)> {
    let agents: Vec<SimAgent> = scenario
        .agents
        .iter()
        .map(|spec| {
            SimAgent::new(
                AgentId::new(),
                spec.display_name.clone(),
                Duration::from_secs(spec.avg_login_secs),
                Duration::from_secs(spec.avg_logout_secs),
            )
        })
        .collect();

    let mut queue_ids = Vec::with_capacity(scenario.queues.len());
    let mut queues: Vec<Queue> = scenario
        .queues
        .iter()
        .map(|spec| {
            let id = QueueId::new();
            queue_ids.push(id);
            Queue::new(
                id,
                spec.display_name.clone(),
                UserId::new(spec.owner.clone()),
                Duration::from_secs(spec.avg_setup_secs),
                Duration::from_secs(spec.sla_secs),
                spec.criticality,
            )
            .with_params(QueueParams {
                min_resources: spec.min_resources,
                max_resources: spec.max_resources,
                force_max: false,
                must_run: spec.must_run,
            })
        })
        .collect();

    for (queue, spec) in queues.iter_mut().zip(&scenario.queues) {
        for _ in 0..spec.pending {
            queue.pending.push(PendingTask::new(
                TaskId::new(),
                queue.id,
                SimInstant::ZERO,
                SimInstant::ZERO.checked_add(Duration::from_secs(spec.sla_secs)),
            ));
        }
    }

    let mut task_waves = Vec::with_capacity(scenario.task_waves.len());
    for wave in &scenario.task_waves {
        let queue = queue_ids
            .get(wave.queue_index)
            .copied()
            .with_context(|| format!("task wave references unknown queue index {}", wave.queue_index))?;
        let sla = queues
            .iter()
            .find(|q| q.id == queue)
            .map(|q| q.sla)
            .unwrap_or_default();
        let at = SimInstant::ZERO.checked_add(Duration::from_secs(wave.at_secs));
        let tasks = (0..wave.count)
            .map(|_| PendingTask::new(TaskId::new(), queue, at, at.checked_add(sla)))
            .collect();
        task_waves.push(TaskWave { at, tasks });
    }
    task_waves.sort_by_key(|w| w.at);

    let state = SimState::new(agents, queues);
    let config = SimConfig::from(&scenario.config);
    Ok((state, task_waves, config))
}

#[cfg(test)]
#[path = "scenario_tests.rs"]
mod tests;
