// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Probe Outcomes & Detection Results
//!
//! Every probed target ends in exactly one [`ProbeOutcome`]:
//! * **Resolved**: the network stack behaved as if the name exists on the local segment.
//! * **NotResolved**: a definitive absence signal.
//! * **Inconclusive**: timeouts, cancellation, missing capabilities or signals that fit neither.
//!
//! A run ends in one [`DetectionResult`], which names at most one candidate and
//! keeps the ordered per-target outcomes for diagnostics.

use std::collections::HashMap;
use std::fmt;

use crate::models::candidate::CandidateName;
use crate::models::device;
use crate::models::target::ProbeTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InconclusiveReason {
    Timeout,
    Cancelled,
    Unsupported(String),
    Ambiguous(String),
}

impl fmt::Display for InconclusiveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::Unsupported(why) => write!(f, "unsupported: {why}"),
            Self::Ambiguous(why) => write!(f, "ambiguous: {why}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Resolved,
    NotResolved,
    Inconclusive(InconclusiveReason),
}

impl ProbeOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    pub fn is_inconclusive(&self) -> bool {
        matches!(self, Self::Inconclusive(_))
    }

    pub fn timeout() -> Self {
        Self::Inconclusive(InconclusiveReason::Timeout)
    }

    pub fn cancelled() -> Self {
        Self::Inconclusive(InconclusiveReason::Cancelled)
    }

    pub fn unsupported(why: impl Into<String>) -> Self {
        Self::Inconclusive(InconclusiveReason::Unsupported(why.into()))
    }

    pub fn ambiguous(why: impl Into<String>) -> Self {
        Self::Inconclusive(InconclusiveReason::Ambiguous(why.into()))
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved => f.write_str("resolved"),
            Self::NotResolved => f.write_str("not resolved"),
            Self::Inconclusive(reason) => write!(f, "inconclusive ({reason})"),
        }
    }
}

/// One `(target, outcome)` pair. `index` is the target's position in
/// expansion order and is what ties are broken on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub index: usize,
    pub target: ProbeTarget,
    pub outcome: ProbeOutcome,
}

impl ProbeReport {
    pub fn new(index: usize, target: ProbeTarget, outcome: ProbeOutcome) -> Self {
        Self {
            index,
            target,
            outcome,
        }
    }

    /// Resolved and attributable to a candidate. Device-only hits never count.
    pub fn is_candidate_match(&self) -> bool {
        self.outcome.is_resolved() && self.target.candidate().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Match {
        candidate: CandidateName,
        target: ProbeTarget,
    },
    NoMatch,
}

/// Resolved / NotResolved / Inconclusive tallies for one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvidence {
    pub candidate: CandidateName,
    pub resolved: usize,
    pub not_resolved: usize,
    pub inconclusive: usize,
}

impl CandidateEvidence {
    fn new(candidate: CandidateName) -> Self {
        Self {
            candidate,
            resolved: 0,
            not_resolved: 0,
            inconclusive: 0,
        }
    }

    fn record(&mut self, outcome: &ProbeOutcome) {
        match outcome {
            ProbeOutcome::Resolved => self.resolved += 1,
            ProbeOutcome::NotResolved => self.not_resolved += 1,
            ProbeOutcome::Inconclusive(_) => self.inconclusive += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    pub verdict: Verdict,
    /// Every outcome gathered during the run, ordered by target index.
    pub outcomes: Vec<ProbeReport>,
    /// How many probes were actually started before the run ended.
    pub probes_started: usize,
}

impl DetectionResult {
    pub fn matched(
        candidate: CandidateName,
        target: ProbeTarget,
        outcomes: Vec<ProbeReport>,
        probes_started: usize,
    ) -> Self {
        Self {
            verdict: Verdict::Match { candidate, target },
            outcomes: sorted(outcomes),
            probes_started,
        }
    }

    pub fn no_match(outcomes: Vec<ProbeReport>, probes_started: usize) -> Self {
        Self {
            verdict: Verdict::NoMatch,
            outcomes: sorted(outcomes),
            probes_started,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self.verdict, Verdict::Match { .. })
    }

    pub fn candidate(&self) -> Option<&CandidateName> {
        match &self.verdict {
            Verdict::Match { candidate, .. } => Some(candidate),
            Verdict::NoMatch => None,
        }
    }

    pub fn matched_target(&self) -> Option<&ProbeTarget> {
        match &self.verdict {
            Verdict::Match { target, .. } => Some(target),
            Verdict::NoMatch => None,
        }
    }

    /// e.g. `Ann's MacBook Pro` when the winning hostname names a known model.
    pub fn device_label(&self) -> Option<String> {
        match &self.verdict {
            Verdict::Match { candidate, target } => {
                device::device_label(candidate, target.hostname())
            }
            Verdict::NoMatch => None,
        }
    }

    /// Device-only targets that resolved, i.e. unnamed devices on the segment.
    pub fn resolved_devices(&self) -> Vec<&ProbeTarget> {
        self.outcomes
            .iter()
            .filter(|report| report.target.is_device_only() && report.outcome.is_resolved())
            .map(|report| &report.target)
            .collect()
    }

    /// Per-candidate tallies in first-seen order.
    pub fn evidence(&self) -> Vec<CandidateEvidence> {
        let mut order: Vec<CandidateEvidence> = Vec::new();
        let mut slots: HashMap<&CandidateName, usize> = HashMap::new();

        for report in &self.outcomes {
            let Some(candidate) = report.target.candidate() else {
                continue;
            };
            let slot = *slots.entry(candidate).or_insert_with(|| {
                order.push(CandidateEvidence::new(candidate.clone()));
                order.len() - 1
            });
            order[slot].record(&report.outcome);
        }

        order
    }
}

fn sorted(mut outcomes: Vec<ProbeReport>) -> Vec<ProbeReport> {
    outcomes.sort_by_key(|report| report.index);
    outcomes
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
