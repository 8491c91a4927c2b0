// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Run-level failures.
//!
//! Only environment and configuration problems end up here. Anything that
//! goes wrong while probing a single hostname is folded into that target's
//! `ProbeOutcome` and never surfaces as an error.

use thiserror::Error;

use crate::models::method::{DetectionMethod, EngineFamily};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no candidate names were supplied")]
    NoCandidates,

    #[error("none of the patterns contains the <name> placeholder and no candidate names were supplied")]
    NoPlaceholder,

    #[error("no hostname patterns were supplied")]
    NoPatterns,

    #[error("unknown detection method '{0}' (expected fetch, webrtc or iframe)")]
    UnknownMethod(String),

    #[error("unknown engine family '{0}' (expected gecko, chromium or webkit)")]
    UnknownEngine(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectError {
    #[error("detection method '{method}' is not available on {engine}")]
    CapabilityUnavailable {
        method: DetectionMethod,
        engine: EngineFamily,
    },

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("detection run was cancelled")]
    Cancelled,
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
