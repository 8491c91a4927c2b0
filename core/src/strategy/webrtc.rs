// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use nameleak_common::models::method::DetectionMethod;
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_common::models::target::ProbeTarget;
use nameleak_common::probe;
use nameleak_protocols::mdns;

use super::ProbeStrategy;
use super::multicast::{Answer, MdnsQuery};

/// Resolves `.local` names over mDNS, the way an ICE agent resolves a
/// remote candidate that hides behind an mDNS name.
///
/// One QU query leaves from every host candidate. The first matching A/AAAA
/// answer on any of them settles the probe. Silence runs into the timeout.
#[derive(Debug, Clone)]
pub struct WebRtcProbe {
    query: MdnsQuery,
}

impl WebRtcProbe {
    /// Gathers host candidates from the local interfaces.
    pub fn new() -> Self {
        Self {
            query: MdnsQuery::from_interfaces(),
        }
    }

    pub fn with_host_candidates(host_candidates: Vec<Ipv4Addr>) -> Self {
        Self {
            query: MdnsQuery::new(host_candidates),
        }
    }

    /// Sends queries to `responder` instead of the mDNS group.
    pub fn with_responder(mut self, responder: SocketAddr) -> Self {
        self.query = self.query.with_responder(responder);
        self
    }
}

impl Default for WebRtcProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeStrategy for WebRtcProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::WebRtc
    }

    async fn probe(&self, target: &ProbeTarget, timeout: Duration) -> ProbeOutcome {
        let hostname: &str = target.hostname();
        if !mdns::is_local_name(hostname) {
            return ProbeOutcome::NotResolved;
        }

        match self.query.ask(hostname, timeout).await {
            Answer::Addresses(_) => ProbeOutcome::Resolved,
            Answer::Silence => ProbeOutcome::timeout(),
            Answer::InvalidName(why) => {
                probe!("{hostname} cannot be queried: {why}");
                ProbeOutcome::NotResolved
            }
            Answer::NoHostCandidates => {
                ProbeOutcome::unsupported("no host candidates were gathered")
            }
            Answer::Failed(why) => ProbeOutcome::ambiguous(why),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::multicast::responder;
    use nameleak_common::models::outcome::InconclusiveReason;

    const LOOPBACK: Ipv4Addr = Ipv4Addr::LOCALHOST;
    const LAN_HOST: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 42);

    #[tokio::test]
    async fn answered_name_resolves() {
        let addr = responder::spawn("anns-imac.local", LAN_HOST).await;
        let probe = WebRtcProbe::with_host_candidates(vec![LOOPBACK]).with_responder(addr);

        let target = ProbeTarget::device_only("anns-imac.local");
        let outcome = probe.probe(&target, Duration::from_secs(2)).await;
        assert_eq!(outcome, ProbeOutcome::Resolved);
    }

    #[tokio::test]
    async fn answer_for_other_name_times_out() {
        let addr = responder::spawn("bobs-imac.local", LAN_HOST).await;
        let probe = WebRtcProbe::with_host_candidates(vec![LOOPBACK]).with_responder(addr);

        let target = ProbeTarget::device_only("anns-imac.local");
        let outcome = probe.probe(&target, Duration::from_millis(200)).await;
        assert_eq!(outcome, ProbeOutcome::timeout());
    }

    #[tokio::test]
    async fn names_outside_local_do_not_resolve() {
        let probe = WebRtcProbe::with_host_candidates(vec![LOOPBACK]);
        let target = ProbeTarget::device_only("anns-imac.example.com");
        let outcome = probe.probe(&target, Duration::from_millis(100)).await;
        assert_eq!(outcome, ProbeOutcome::NotResolved);
    }

    #[tokio::test]
    async fn no_host_candidates_is_unsupported() {
        let probe = WebRtcProbe::with_host_candidates(Vec::new());
        let target = ProbeTarget::device_only("anns-imac.local");
        let outcome = probe.probe(&target, Duration::from_millis(100)).await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Inconclusive(InconclusiveReason::Unsupported(_))
        ));
    }
}
