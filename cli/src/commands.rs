// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! Every flag and argument lives here. The execution logic of each command sits
//! in its own submodule, and `From<&CommandLine> for Config` keeps the core
//! crates unaware of `clap`.
//!
//! * [`CommandLine`]: global flags shaping the terminal output.
//! * [`Commands`]: the mutually exclusive operation modes.

pub mod guess;
pub mod patterns;

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use nameleak_common::config::{Config, DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT};
use nameleak_common::models::method::{DetectionMethod, EngineFamily};

#[derive(Parser)]
#[command(name = "nameleak")]
#[command(about = "Guesses the owner's first name from the machine's mDNS hostname.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Keep logs and colors but hide the ASCII art
    #[arg(long = "no-banner", global = true)]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: reduce styling, -qq: bare verdict)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Mask names and hostnames in the output
    #[arg(long = "redact", global = true)]
    pub redact: bool,

    /// Increase logging detail (-v: run summary, -vv: every probe)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Do not listen for 'q' on the keyboard
    #[arg(long = "no-input", global = true)]
    pub no_input: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find which candidate name the local hostname carries
    #[command(alias = "g")]
    Guess(GuessArgs),

    /// Print the default hostname patterns
    #[command(alias = "p")]
    Patterns,
}

#[derive(Args, Debug)]
pub struct GuessArgs {
    /// Candidate first names
    #[arg(short = 'n', long = "name", value_name = "NAME", num_args(1..))]
    pub names: Vec<String>,

    /// Read candidate names from a file, one per line
    #[arg(long = "names-file", value_name = "PATH")]
    pub names_file: Option<PathBuf>,

    /// Hostname patterns; `<name>` marks where the candidate goes
    #[arg(short = 'p', long = "pattern", value_name = "TEMPLATE", num_args(1..))]
    pub patterns: Vec<String>,

    /// Side channel to probe with: fetch, webrtc or iframe
    #[arg(short = 'm', long = "method", value_name = "METHOD")]
    pub method: Option<DetectionMethod>,

    /// Browser engine family to behave like: gecko, chromium or webkit
    #[arg(short = 'e', long = "engine", value_name = "ENGINE", default_value = "chromium")]
    pub engine: EngineFamily,

    /// Probes in flight at once
    #[arg(short = 'c', long = "concurrency", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long = "timeout-ms", default_value_t = DEFAULT_PROBE_TIMEOUT.as_millis() as u64)]
    pub timeout_ms: u64,

    /// Print every probe outcome after the run
    #[arg(long = "diagnostics")]
    pub diagnostics: bool,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            redact: cmd.redact,
            quiet: cmd.quiet,
            disable_input: cmd.no_input,
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
