// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rpasim`: a command-line driver for the RPA fleet decision engine and
//! discrete-event simulator.

mod color;
mod exit_error;
mod scenario;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use exit_error::ExitError;
use rpasim_simulator::Simulator;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_GIT_HASH"), ")");

#[derive(Parser)]
#[command(
    name = "rpasim",
    version,
    long_version = LONG_VERSION,
    about = "RPA fleet decision engine and simulator",
    styles = color::styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario file to completion (or up to `--max-ticks`) and
    /// print the final snapshot.
    Run {
        /// Path to a JSON scenario file.
        scenario: PathBuf,
        /// Stop after this many ticks even if the simulator has not
        /// finished draining its queues.
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,
        /// Print a snapshot after every tick instead of only the final one.
        #[arg(long)]
        verbose: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run(cli: Cli) -> Result<(), ExitError> {
    match cli.command {
        Command::Run { scenario, max_ticks, verbose } => run_scenario(&scenario, max_ticks, verbose),
    }
}

fn run_scenario(path: &std::path::Path, max_ticks: u64, verbose: bool) -> Result<(), ExitError> {
    let (state, task_waves, config) = scenario::load(path)
        .map_err(|err| ExitError::new(2, format!("failed to load scenario: {err:#}")))?;

    info!(agents = state.agents.len(), queues = state.queues.len(), "scenario loaded");
    let mut simulator = Simulator::new(state, config, task_waves)
        .map_err(|err| ExitError::new(2, format!("invalid configuration: {err}")))?;
    simulator.start();

    let mut ticks = 0u64;
    let mut last_snapshot = None;
    while !simulator.is_finished() && ticks < max_ticks {
        let snapshot = simulator
            .tick()
            .map_err(|err| ExitError::new(1, format!("tick {ticks} failed: {err}")))?;
        if verbose {
            print_snapshot(&snapshot);
        }
        last_snapshot = Some(snapshot);
        ticks += 1;
    }

    if !simulator.is_finished() {
        eprintln!("warning: scenario did not finish within {max_ticks} ticks");
    } else {
        info!(ticks, "scenario drained");
    }
    if let Some(snapshot) = last_snapshot {
        if !verbose {
            print_snapshot(&snapshot);
        }
    }
    Ok(())
}

fn print_snapshot(snapshot: &rpasim_simulator::Snapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize snapshot: {err}"),
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(err.code);
    }
}
