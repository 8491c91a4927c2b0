// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use crate::models::candidate::{self, CandidateName, PatternTemplate};
use crate::models::method::{DetectionMethod, Environment};

/// In-flight probe cap. Browsers allow about six connections per host, and
/// staying under that keeps anti-abuse heuristics quiet.
pub const DEFAULT_CONCURRENCY: usize = 6;

/// Upper bound for a single probe before it counts as inconclusive.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Global presentation options for the terminal front end.
///
/// Built from CLI flags; the engine never reads it.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skips the startup banner. Logs and colors stay.
    pub no_banner: bool,

    /// Masks candidate names and hostnames in the output.
    ///
    /// The whole point of the tool is that these leak a person's name, so
    /// this is what you want before pasting output anywhere.
    pub redact: bool,

    /// Visual density of the output.
    ///
    /// # Levels
    /// * **0** (Default): banner, headers and trees.
    /// * **1**: Reduced styling.
    /// * **2**: Raw mode. Only the matched name (or nothing) is printed.
    pub quiet: u8,

    /// Disables the keyboard listener that cancels a run on `q` / Ctrl-C.
    ///
    /// Needed in CI and whenever stdin is not a terminal.
    pub disable_input: bool,
}

/// Engine-side knobs for one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionConfig {
    pub concurrency: usize,
    pub probe_timeout: Duration,
    pub environment: Environment,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            environment: Environment::default(),
        }
    }
}

impl DetectionConfig {
    /// Clamped to at least one probe in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

/// What the form layer collects. `country_code` and `gender` only label where
/// the names came from; the dictionary lookup happens outside this workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub country_code: Option<String>,
    pub gender: Option<String>,
    /// Newline separated pattern templates.
    pub patterns: String,
    /// Newline separated candidate names.
    pub names: String,
    pub detection_method: DetectionMethod,
}

impl FormInput {
    pub fn candidates(&self) -> Vec<CandidateName> {
        candidate::parse_candidates(&self.names)
    }

    pub fn templates(&self) -> Vec<PatternTemplate> {
        candidate::parse_templates(&self.patterns)
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
