// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::time::Duration;

use super::*;

#[test]
fn default_config_validates() {
    assert!(SimConfig::default().validate().is_ok());
}

#[test]
fn zero_step_is_rejected() {
    let config = SimConfig { step: Duration::ZERO, ..SimConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn negative_speed_multiplier_is_rejected() {
    let config = SimConfig { speed_multiplier: -1.0, ..SimConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn non_finite_bias_is_rejected() {
    let config = SimConfig { bias: f64::NAN, ..SimConfig::default() };
    assert!(config.validate().is_err());
}

#[test]
fn zero_speed_multiplier_is_allowed_as_fast_as_possible() {
    let config = SimConfig { speed_multiplier: 0.0, ..SimConfig::default() };
    assert!(config.validate().is_ok());
}
