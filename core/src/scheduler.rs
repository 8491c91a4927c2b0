// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Bounded, cancellable probe racing.
//!
//! Targets are admitted in order into a window of at most `concurrency`
//! in-flight probes. Every probe is raced against its own timeout and against
//! the run's cancellation token, so each admitted target produces exactly one
//! [`ProbeReport`] and nothing outlives the run.
//!
//! [`ProbeScheduler::run_until_match`] stops at the first candidate-attributed
//! `Resolved` outcome. Reports that completed in the same tick are collected
//! before the rest is cancelled, and the earliest-enqueued match among them wins.

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use nameleak_common::config::{DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT, DetectionConfig};
use nameleak_common::error::DetectError;
use nameleak_common::models::outcome::{DetectionResult, ProbeOutcome, ProbeReport};
use nameleak_common::models::target::ProbeTarget;
use nameleak_common::{debug, probe};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::strategy::ProbeStrategy;

const REPORT_BUFFER: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerOptions {
    /// Upper bound on in-flight probes. Never below 1.
    pub concurrency: usize,
    pub probe_timeout: Duration,
}

impl Default for SchedulerOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

impl From<&DetectionConfig> for SchedulerOptions {
    fn from(cfg: &DetectionConfig) -> Self {
        Self {
            concurrency: cfg.concurrency.max(1),
            probe_timeout: cfg.probe_timeout,
        }
    }
}

pub struct ProbeScheduler {
    options: SchedulerOptions,
    cancel: CancellationToken,
}

impl ProbeScheduler {
    pub fn new(options: SchedulerOptions) -> Self {
        Self::with_cancellation(options, CancellationToken::new())
    }

    /// Ties the scheduler to an external token. Cancelling it stops every run.
    pub fn with_cancellation(options: SchedulerOptions, cancel: CancellationToken) -> Self {
        Self { options, cancel }
    }

    pub fn options(&self) -> SchedulerOptions {
        self.options
    }

    /// Streams every report as it completes, without stopping at a match.
    ///
    /// The run ends once all targets are probed, the token is cancelled, or
    /// the receiver is dropped. A cancelled run reports its in-flight probes as
    /// `Cancelled` and leaves queued targets unreported.
    pub fn run(
        &self,
        targets: Vec<ProbeTarget>,
        strategy: Arc<dyn ProbeStrategy>,
    ) -> mpsc::Receiver<ProbeReport> {
        let (tx, rx) = mpsc::channel(REPORT_BUFFER);
        let options = self.options;
        let token = self.cancel.child_token();

        tokio::spawn(async move {
            let mut pool = ProbePool::new(targets, strategy.as_ref(), options, token.clone());
            pool.fill();

            loop {
                let report = tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    _ = tx.closed() => None,
                    report = pool.next() => report,
                };

                let Some(report) = report else {
                    break;
                };
                if tx.send(report).await.is_err() {
                    break;
                }
                pool.fill();
            }

            for report in pool.abort() {
                if tx.send(report).await.is_err() {
                    break;
                }
            }
        });

        rx
    }

    /// Probes until a candidate-attributed target resolves or the targets run out.
    ///
    /// Returns `Err(DetectError::Cancelled)` when the external token fires
    /// first. A device-only target that resolves is recorded but never ends the run.
    pub async fn run_until_match(
        &self,
        targets: Vec<ProbeTarget>,
        strategy: &dyn ProbeStrategy,
    ) -> Result<DetectionResult, DetectError> {
        if self.cancel.is_cancelled() {
            return Err(DetectError::Cancelled);
        }

        let mut pool = ProbePool::new(targets, strategy, self.options, self.cancel.child_token());
        let mut reports: Vec<ProbeReport> = Vec::new();
        pool.fill();

        loop {
            let step = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Step::Cancelled,
                report = pool.next() => report.map_or(Step::Exhausted, Step::Report),
            };

            match step {
                Step::Cancelled => {
                    let aborted = pool.abort().len();
                    debug!("Run cancelled with {aborted} probes in flight");
                    return Err(DetectError::Cancelled);
                }
                Step::Exhausted => {
                    debug!("All {} probes finished without a match", pool.started);
                    return Ok(DetectionResult::no_match(reports, pool.started));
                }
                Step::Report(report) => {
                    probe!("{} -> {}", report.target, report.outcome);
                    let is_match = report.is_candidate_match();
                    reports.push(report);

                    if is_match {
                        reports.extend(pool.drain_ready());
                        reports.extend(pool.abort());
                        return Ok(settle(reports, pool.started));
                    }
                    pool.fill();
                }
            }
        }
    }
}

enum Step {
    Cancelled,
    Report(ProbeReport),
    Exhausted,
}

/// Builds the match result, picking the earliest-enqueued resolved candidate.
fn settle(reports: Vec<ProbeReport>, started: usize) -> DetectionResult {
    let winner = reports
        .iter()
        .filter(|report| report.is_candidate_match())
        .min_by_key(|report| report.index)
        .and_then(|report| {
            report
                .target
                .candidate()
                .map(|candidate| (candidate.clone(), report.target.clone()))
        });

    match winner {
        Some((candidate, target)) => {
            debug!("Matched {target} after {started} probes");
            DetectionResult::matched(candidate, target, reports, started)
        }
        None => DetectionResult::no_match(reports, started),
    }
}

/// The admission window over one run's target queue.
struct ProbePool<'a> {
    strategy: &'a dyn ProbeStrategy,
    queue: VecDeque<(usize, ProbeTarget)>,
    in_flight: FuturesUnordered<BoxFuture<'a, ProbeReport>>,
    /// Targets admitted but not yet reported, keyed by index.
    pending: BTreeMap<usize, ProbeTarget>,
    started: usize,
    options: SchedulerOptions,
    token: CancellationToken,
}

impl<'a> ProbePool<'a> {
    fn new(
        targets: Vec<ProbeTarget>,
        strategy: &'a dyn ProbeStrategy,
        options: SchedulerOptions,
        token: CancellationToken,
    ) -> Self {
        let mut seen: HashSet<String> = HashSet::new();
        let queue: VecDeque<(usize, ProbeTarget)> = targets
            .into_iter()
            .filter(|target| seen.insert(target.hostname().to_string()))
            .enumerate()
            .collect();

        Self {
            strategy,
            queue,
            in_flight: FuturesUnordered::new(),
            pending: BTreeMap::new(),
            started: 0,
            options,
            token,
        }
    }

    /// Admits queued targets until the window is full.
    fn fill(&mut self) {
        let cap: usize = self.options.concurrency.max(1);
        while self.in_flight.len() < cap && !self.token.is_cancelled() {
            let Some((index, target)) = self.queue.pop_front() else {
                break;
            };
            self.pending.insert(index, target.clone());
            self.started += 1;
            self.in_flight.push(self.launch(index, target));
        }
    }

    fn launch(&self, index: usize, target: ProbeTarget) -> BoxFuture<'a, ProbeReport> {
        let strategy: &'a dyn ProbeStrategy = self.strategy;
        let token: CancellationToken = self.token.clone();
        let limit: Duration = self.options.probe_timeout;

        async move {
            let outcome: ProbeOutcome = tokio::select! {
                _ = token.cancelled() => ProbeOutcome::cancelled(),
                res = tokio::time::timeout(limit, strategy.probe(&target, limit)) => {
                    res.unwrap_or_else(|_| ProbeOutcome::timeout())
                }
            };
            ProbeReport::new(index, target, outcome)
        }
        .boxed()
    }

    async fn next(&mut self) -> Option<ProbeReport> {
        let report = self.in_flight.next().await?;
        self.pending.remove(&report.index);
        Some(report)
    }

    /// Reports that are already complete, without waiting on anything.
    fn drain_ready(&mut self) -> Vec<ProbeReport> {
        let mut ready = Vec::new();
        while let Some(Some(report)) = self.in_flight.next().now_or_never() {
            self.pending.remove(&report.index);
            ready.push(report);
        }
        ready
    }

    /// Cancels everything still in flight and drops the queue.
    ///
    /// Dropping the futures releases their sockets. Each dropped probe is
    /// reported as `Cancelled`; queued targets were never started and get no report.
    fn abort(&mut self) -> Vec<ProbeReport> {
        self.token.cancel();
        self.in_flight.clear();
        self.queue.clear();

        std::mem::take(&mut self.pending)
            .into_iter()
            .map(|(index, target)| ProbeReport::new(index, target, ProbeOutcome::cancelled()))
            .collect()
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
