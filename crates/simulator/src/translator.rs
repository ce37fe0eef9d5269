// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command Translator (C15, §4.11): maps decision-engine commands to
//! simulator commands.

use rpasim_core::{Command, Queue};

use crate::state::SimCommand;

/// Translate an engine command sequence targeting `queue` into simulator
/// commands. `Command::Empty` means "no transition required" and is
/// omitted from the output.
pub fn translate(commands: &[Command], queue: &Queue) -> Vec<SimCommand> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Login => Some(SimCommand::Login(queue.owner.clone())),
            Command::Logout => Some(SimCommand::Logout),
            Command::ExecuteQueue => Some(SimCommand::StartProcess(queue.id)),
            Command::Empty => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "translator_tests.rs"]
mod tests;
