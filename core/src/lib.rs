// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # nameleak core
//!
//! The name-candidate detection engine.
//!
//! Candidate names are expanded into hostnames ([`expander`]), each hostname is
//! probed through one browser-style side channel ([`strategy`]), the probes are
//! raced under a concurrency cap ([`scheduler`]), and [`engine`] ties it together
//! into a single `detect` call.

pub mod engine;
pub mod expander;
pub mod scheduler;
pub mod strategy;

pub use engine::DetectionEngine;
pub use scheduler::{ProbeScheduler, SchedulerOptions};
pub use strategy::ProbeStrategy;
