// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Side channels that reveal whether a hostname resolves.
//!
//! None of them can read a DNS answer directly. Each one triggers an operation
//! whose observable behaviour differs between "name resolved" and "name did
//! not resolve":
//! - [`FetchProbe`]: resolution failure surfaces before any connection is tried.
//!   Names are resolved in-process, so a lookup dies with its probe.
//! - [`WebRtcProbe`]: a `.local` candidate only ever gets an mDNS answer when a
//!   device owns the name.
//! - [`IframeProbe`]: a document load gets a response, or a reset, only from a
//!   real host. Gecko-family environments only.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use nameleak_common::models::method::{DetectionMethod, Environment};
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_common::models::target::ProbeTarget;

mod fetch;
mod iframe;
mod multicast;
mod resolve;
mod webrtc;

pub use fetch::FetchProbe;
pub use iframe::IframeProbe;
pub use webrtc::WebRtcProbe;

/// A single way of asking "does this hostname resolve?".
///
/// `probe` never fails. Anything it cannot interpret becomes
/// [`ProbeOutcome::Inconclusive`]. The `timeout` is a hint for probes that
/// wait on the network by themselves; the scheduler enforces it regardless and
/// drops the future once it elapses, which releases any socket it holds.
#[async_trait]
pub trait ProbeStrategy: Send + Sync {
    fn method(&self) -> DetectionMethod;

    async fn probe(&self, target: &ProbeTarget, timeout: Duration) -> ProbeOutcome;
}

/// Builds the strategy for `method`.
///
/// Capability checks belong to the caller; an `IframeProbe` built for a
/// non-Gecko environment answers every probe with `Unsupported`.
pub fn for_method(method: DetectionMethod, environment: Environment) -> Arc<dyn ProbeStrategy> {
    match method {
        DetectionMethod::Fetch => Arc::new(FetchProbe::new()),
        DetectionMethod::WebRtc => Arc::new(WebRtcProbe::new()),
        DetectionMethod::Iframe => Arc::new(IframeProbe::new(environment)),
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
