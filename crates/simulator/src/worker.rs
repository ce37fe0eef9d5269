// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker / Observer (C11, §4.8): trigger detection, decision-engine
//! invocation, and pending-command dispatch.

use std::collections::HashMap;

use rpasim_core::{AgentId, SimInstant};
use tracing::{debug, info, instrument};

use crate::adapter;
use crate::config::SimConfig;
use crate::error::SimError;
use crate::event::Event;
use crate::event_queue::EventQueue;
use crate::state::{SimAgentState, SimCommand, SimState};
use crate::translator;

/// Tracks the last timestamp the decision engine was invoked; `None`
/// models "negative infinity" (§4.8: never called yet, so the timer
/// trigger always fires on the first `observe`).
#[derive(Debug, Default)]
pub struct Worker {
    last_decision_call: Option<SimInstant>,
}

impl Worker {
    pub fn new() -> Self {
        Self { last_decision_call: None }
    }

    /// Run one observation cycle: check triggers, possibly re-plan via
    /// the decision engine, then dispatch one pending command per stable
    /// agent (§4.8).
    #[instrument(skip(self, state, event_queue, config), fields(now = %now))]
    pub fn observe(
        &mut self,
        state: &mut SimState,
        now: SimInstant,
        event_queue: &mut EventQueue,
        config: &SimConfig,
    ) -> Result<(), SimError> {
        if self.should_replan(state, now, config) {
            self.replan(state, now, config)?;
        }
        self.dispatch_pending_commands(state, now, event_queue);
        Ok(())
    }

    fn should_replan(&self, state: &SimState, now: SimInstant, config: &SimConfig) -> bool {
        let timer_due = match self.last_decision_call {
            None => true,
            Some(last) => now.saturating_sub(last) >= config.decision_interval,
        };
        let idle_trigger = state
            .agents
            .iter()
            .any(|a| matches!(a.state, SimAgentState::Idle { .. }) && a.pending_commands.is_empty());
        timer_due || idle_trigger
    }

    fn replan(&mut self, state: &mut SimState, now: SimInstant, config: &SimConfig) -> Result<(), SimError> {
        let (engine_agents, engine_queues) = adapter::adapt(state, now);
        let assignments =
            rpasim_decision::decide(&engine_agents, &engine_queues, config.decision_horizon, config.bias)
                .map_err(|e| SimError::DecisionFailed(e.to_string()))?;
        debug!(assignment_count = assignments.len(), "decision engine returned assignments");

        let queues_by_id: HashMap<_, _> = state.queues.iter().map(|q| (q.id, q)).collect();
        let mut translated: HashMap<AgentId, Vec<SimCommand>> = HashMap::new();
        for assignment in &assignments {
            // `assignments` is ordered by descending benefit (§4.7); an
            // agent can appear more than once if the selector picked
            // several of its candidates, so keep only its first
            // (highest-benefit) one rather than letting a later, weaker
            // assignment overwrite it.
            if translated.contains_key(&assignment.agent_id) {
                continue;
            }
            let Some(queue) = queues_by_id.get(&assignment.queue_id) else { continue };
            translated.insert(assignment.agent_id, translator::translate(&assignment.commands, queue));
        }
        drop(queues_by_id);

        for (agent_id, commands) in translated {
            if let Some(agent) = state.agent_mut(agent_id) {
                agent.pending_commands = commands;
            }
        }

        self.last_decision_call = Some(now);
        Ok(())
    }

    fn dispatch_pending_commands(&self, state: &mut SimState, now: SimInstant, event_queue: &mut EventQueue) {
        let queue_info: HashMap<_, _> =
            state.queues.iter().map(|q| (q.id, (q.owner.clone(), q.avg_setup))).collect();

        for agent in state.agents.iter_mut() {
            if !agent.state.is_stable() {
                continue; // invariant I6: transient agents never get a new command
            }
            let Some(command) = agent.pending_commands.first().cloned() else { continue };
            agent.pending_commands.remove(0);

            match command {
                SimCommand::Login(user) => {
                    agent.state = SimAgentState::LoggingIn { user: user.clone() };
                    event_queue.schedule(Event::LoginDone {
                        agent: agent.id,
                        user,
                        timestamp: now.checked_add(agent.avg_login),
                    });
                }
                SimCommand::Logout => {
                    event_queue.schedule(Event::LogoutDone {
                        agent: agent.id,
                        timestamp: now.checked_add(agent.avg_logout),
                    });
                    if let Some(user) = agent.state.current_user().cloned() {
                        agent.state = SimAgentState::LoggingOut { user };
                    }
                }
                SimCommand::StartProcess(queue_id) => {
                    if let Some((owner, avg_setup)) = queue_info.get(&queue_id) {
                        agent.state = SimAgentState::SettingUpQueue { user: owner.clone(), queue: queue_id };
                        event_queue.schedule(Event::SetupDone {
                            agent: agent.id,
                            queue: queue_id,
                            timestamp: now.checked_add(*avg_setup),
                        });
                    }
                }
                SimCommand::StopProcess => {
                    agent.stop_requested_at = Some(now);
                    info!(agent = %agent.id, "stop requested");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
