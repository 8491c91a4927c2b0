// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # nameleak CLI Entry Point
//!
//! Bootstraps the runtime and owns the process lifecycle. The detection logic
//! itself lives in `nameleak-core`.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: `#[tokio::main]` sets up the async runtime.
//! 2.  **Global State Setup**: Installs the `tracing` subscriber and the terminal
//!     output modes (verbosity, quiet mode, banner, redaction).
//! 3.  **Configuration Mapping**: Turns the parsed `clap` arguments into [`Config`].
//! 4.  **Command Dispatch**: Routes execution to the matching module in `commands/`.
//! 5.  **Error Boundary**: Logs whatever a command propagates and converts it
//!     into a non-zero `ExitCode`.

mod commands;
mod terminal;

use std::process::ExitCode;

use nameleak_common::{config::Config, error};

use crate::{
    commands::{CommandLine, Commands, guess, patterns},
    terminal::{print::Print, spinner},
};

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    spinner::init_logging(commands.verbosity);

    let cfg = Config::from(&commands);

    if let Err(e) = Print::init(&cfg) {
        error!("Critical failure: {e}");
        return ExitCode::FAILURE;
    }
    Print::banner();

    let result = match &commands.command {
        Commands::Guess(args) => guess::guess(args, &cfg).await,
        Commands::Patterns => patterns::patterns(&cfg),
    };

    let exit_code = match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
