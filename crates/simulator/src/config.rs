// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulator configuration (§6, SPEC_FULL §6.1).

use std::time::Duration;

use rpasim_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Recognized simulator options (§6), validated once at construction —
/// never at tick time (§7 kind 1: configuration errors are surfaced at
/// validation time).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Clock advance per tick.
    pub step: Duration,
    /// Minimum gap between Worker → Engine calls when not idle-triggered.
    pub decision_interval: Duration,
    /// Lookahead window used by the Engine for real-capacity.
    pub decision_horizon: Duration,
    /// Max simulated-time span for a forecast.
    pub forecast_horizon: Duration,
    /// Real-seconds-per-sim-step = step / multiplier (0 = as fast as possible).
    pub speed_multiplier: f64,
    /// Weight of SLA-failure fraction in queue-weight.
    pub bias: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            step: Duration::from_secs(1),
            decision_interval: Duration::from_secs(600),
            decision_horizon: Duration::from_secs(600),
            forecast_horizon: Duration::from_secs(8 * 3600),
            speed_multiplier: 1.0,
            bias: 0.5,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.step.is_zero() {
            return Err(ConfigError::Invalid("step must be > 0".to_string()));
        }
        if self.decision_interval.is_zero() {
            return Err(ConfigError::Invalid("decision_interval must be > 0".to_string()));
        }
        if self.decision_horizon.is_zero() {
            return Err(ConfigError::Invalid("decision_horizon must be > 0".to_string()));
        }
        if self.forecast_horizon.is_zero() {
            return Err(ConfigError::Invalid("forecast_horizon must be > 0".to_string()));
        }
        if self.speed_multiplier < 0.0 {
            return Err(ConfigError::Invalid("speed_multiplier must be >= 0".to_string()));
        }
        if !self.bias.is_finite() {
            return Err(ConfigError::Invalid("bias must be finite".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
