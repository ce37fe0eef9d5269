// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration validation errors, shared by the decision engine and the
//! simulator crates.

use thiserror::Error;

/// Surfaced at validation time; never at runtime (spec §7 kind 1).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
