// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! The single entry point of a detection run.
//!
//! `detect` checks the method against the environment, validates its input,
//! expands names into hostnames and hands them to a [`ProbeScheduler`] driving
//! the strategy the method selects. Nothing survives the call: every run
//! allocates its own targets, outcomes and cancellation token.

use std::sync::{Mutex, MutexGuard, PoisonError};

use nameleak_common::config::{DetectionConfig, FormInput};
use nameleak_common::error::{ConfigError, DetectError};
use nameleak_common::models::candidate::{CandidateName, PatternTemplate};
use nameleak_common::models::method::DetectionMethod;
use nameleak_common::models::outcome::DetectionResult;
use nameleak_common::models::target::ProbeTarget;
use nameleak_common::{info, success, warn};
use tokio_util::sync::CancellationToken;

use crate::expander;
use crate::scheduler::{ProbeScheduler, SchedulerOptions};
use crate::strategy::{self, ProbeStrategy};

/// Runs detections under one configuration.
///
/// Runs are not meant to overlap: two concurrent calls compete for the same
/// connection budget. Starting a run while another one is still going
/// cancels the older one.
pub struct DetectionEngine {
    config: DetectionConfig,
    run: Mutex<RunSlot>,
}

/// Token of the run in progress, or of the next run when idle.
struct RunSlot {
    token: CancellationToken,
    generation: u64,
    active: bool,
}

/// Hands the slot back to the next run once its owner is done or dropped.
struct RunGuard<'a> {
    engine: &'a DetectionEngine,
    generation: u64,
    token: CancellationToken,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut slot = self.engine.slot();
        if slot.generation == self.generation {
            slot.token = CancellationToken::new();
            slot.active = false;
        }
    }
}

impl DetectionEngine {
    pub fn new(config: DetectionConfig) -> Self {
        Self {
            config,
            run: Mutex::new(RunSlot {
                token: CancellationToken::new(),
                generation: 0,
                active: false,
            }),
        }
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    /// Token of the current run, or of the next one when no run is going.
    ///
    /// Cancelling it ends that run with [`DetectError::Cancelled`]. Later runs
    /// get a fresh token, so an old cancellation never leaks into them.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.slot().token.clone()
    }

    /// Cancels the run in progress, if any.
    pub fn cancel(&self) {
        let slot = self.slot();
        if slot.active {
            slot.token.cancel();
        }
    }

    fn slot(&self) -> MutexGuard<'_, RunSlot> {
        self.run.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_run(&self) -> RunGuard<'_> {
        let mut slot = self.slot();
        if slot.active {
            warn!("A new detection run supersedes the one in progress");
        }
        if slot.active || slot.token.is_cancelled() {
            slot.token.cancel();
            slot.token = CancellationToken::new();
        }
        slot.generation = slot.generation.wrapping_add(1);
        slot.active = true;

        RunGuard {
            engine: self,
            generation: slot.generation,
            token: slot.token.clone(),
        }
    }

    /// Finds which candidate names the machine, using the strategy `method` selects.
    ///
    /// # Errors
    ///
    /// - [`DetectError::CapabilityUnavailable`] when the environment cannot run
    ///   `method`. Raised before anything else is looked at.
    /// - [`DetectError::Configuration`] for an empty template list or an empty
    ///   candidate list. Templates without the `<name>` placeholder are fine
    ///   as long as names were supplied; they probe the device name alone.
    /// - [`DetectError::Cancelled`] when the run's cancellation token fires, or
    ///   when a newer run on the same engine supersedes it.
    pub async fn detect(
        &self,
        candidates: &[CandidateName],
        templates: &[PatternTemplate],
        method: DetectionMethod,
    ) -> Result<DetectionResult, DetectError> {
        self.check_capability(method)?;
        validate(candidates, templates)?;

        let strategy = strategy::for_method(method, self.config.environment);
        self.run(candidates, templates, strategy.as_ref()).await
    }

    /// Same as [`detect`](Self::detect) with a caller-supplied strategy.
    pub async fn detect_with_strategy(
        &self,
        candidates: &[CandidateName],
        templates: &[PatternTemplate],
        strategy: &dyn ProbeStrategy,
    ) -> Result<DetectionResult, DetectError> {
        self.check_capability(strategy.method())?;
        validate(candidates, templates)?;
        self.run(candidates, templates, strategy).await
    }

    /// Runs a detection from raw form fields.
    ///
    /// Country and gender only describe where the names came from and do not
    /// influence the run.
    pub async fn detect_form(&self, form: &FormInput) -> Result<DetectionResult, DetectError> {
        self.detect(&form.candidates(), &form.templates(), form.detection_method)
            .await
    }

    fn check_capability(&self, method: DetectionMethod) -> Result<(), DetectError> {
        let environment = self.config.environment;
        if environment.supports(method) {
            return Ok(());
        }
        warn!("{method} probing is not available on {}", environment.engine());
        Err(DetectError::CapabilityUnavailable {
            method,
            engine: environment.engine(),
        })
    }

    async fn run(
        &self,
        candidates: &[CandidateName],
        templates: &[PatternTemplate],
        strategy: &dyn ProbeStrategy,
    ) -> Result<DetectionResult, DetectError> {
        let targets: Vec<ProbeTarget> = expander::expand(templates, candidates);
        let options = SchedulerOptions::from(&self.config);

        info!(
            verbosity = 1,
            "Probing {} hostnames for {} names via {} ({} at a time)",
            targets.len(),
            candidates.len(),
            strategy.method(),
            options.concurrency
        );

        let run: RunGuard<'_> = self.begin_run();
        let scheduler = ProbeScheduler::with_cancellation(options, run.token.clone());
        let result = scheduler.run_until_match(targets, strategy).await;
        drop(run);
        let result = result?;

        if let Some(target) = result.matched_target() {
            success!(verbosity = 1, "{target} resolved");
        }
        Ok(result)
    }
}

fn validate(
    candidates: &[CandidateName],
    templates: &[PatternTemplate],
) -> Result<(), ConfigError> {
    if templates.is_empty() {
        return Err(ConfigError::NoPatterns);
    }
    if candidates.is_empty() {
        if templates.iter().any(PatternTemplate::has_placeholder) {
            return Err(ConfigError::NoCandidates);
        }
        return Err(ConfigError::NoPlaceholder);
    }
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
