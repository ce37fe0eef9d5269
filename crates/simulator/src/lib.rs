// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rpasim-simulator: the discrete-event simulator — event queue and
//! transitions, claim-and-schedule protocol, Worker/Observer, the live
//! tick loop, the Forecast Runner, and the State Adapter / Command
//! Translator that bridge to `rpasim-decision`.

pub mod adapter;
pub mod claim;
pub mod config;
pub mod engine_loop;
pub mod error;
pub mod event;
pub mod event_queue;
pub mod forecast;
pub mod snapshot;
pub mod state;
pub mod translator;
pub mod worker;

pub use config::SimConfig;
pub use engine_loop::{Simulator, TaskWave};
pub use error::SimError;
pub use event::Event;
pub use event_queue::EventQueue;
pub use forecast::{ForecastResult, ForecastRunner, SegmentKind, TimelineSegment};
pub use snapshot::Snapshot;
pub use state::{SimAgent, SimAgentState, SimCommand, SimState};
