// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Target Model
//!
//! A [`ProbeTarget`] is one concrete hostname to probe.
//!
//! It remembers which candidate produced it (if any) so a resolution can be
//! attributed back to a name. That link is set at construction and never
//! changes afterwards; there are no setters on purpose.

use std::fmt;

use crate::models::candidate::CandidateName;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProbeTarget {
    hostname: String,
    candidate: Option<CandidateName>,
}

impl ProbeTarget {
    /// A hostname built by substituting `candidate` into a template.
    pub fn for_candidate(hostname: impl Into<String>, candidate: CandidateName) -> Self {
        Self {
            hostname: hostname.into(),
            candidate: Some(candidate),
        }
    }

    /// A literal hostname coming from a template without a placeholder.
    pub fn device_only(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            candidate: None,
        }
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn candidate(&self) -> Option<&CandidateName> {
        self.candidate.as_ref()
    }

    pub fn is_device_only(&self) -> bool {
        self.candidate.is_none()
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)
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
