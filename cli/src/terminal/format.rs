// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use crate::terminal::colors;
use colored::*;
use nameleak_common::models::candidate::CandidateName;
use nameleak_common::models::device;
use nameleak_common::models::outcome::{InconclusiveReason, ProbeOutcome};
use nameleak_common::utils::redact;

pub fn candidate(name: &CandidateName, redacted: bool) -> ColoredString {
    let name_str: String = if redacted {
        redact::name(name.as_str())
    } else {
        name.to_string()
    };
    name_str.color(colors::PRIMARY).bold()
}

pub fn hostname(host: &str, redacted: bool) -> ColoredString {
    let host_str: String = if redacted {
        redact::hostname(host)
    } else {
        host.to_string()
    };
    host_str.color(colors::HOSTNAME)
}

/// `Ann's MacBook Pro`, built from the masked name when redacting.
pub fn device_label(name: &CandidateName, host: &str, redacted: bool) -> Option<ColoredString> {
    let owner: String = if redacted {
        redact::name(name.as_str())
    } else {
        name.to_string()
    };
    device::identify_owned(name, host)
        .map(|device| device.label_for(&owner).color(colors::SECONDARY))
}

pub fn outcome(outcome: &ProbeOutcome) -> ColoredString {
    match outcome {
        ProbeOutcome::Resolved => "resolved".color(colors::RESOLVED).bold(),
        ProbeOutcome::NotResolved => "not resolved".color(colors::SEPARATOR),
        ProbeOutcome::Inconclusive(InconclusiveReason::Cancelled) => {
            "cancelled".color(colors::SEPARATOR).italic()
        }
        ProbeOutcome::Inconclusive(reason) => reason.to_string().color(colors::INCONCLUSIVE),
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
