// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use nameleak_common::models::method::DetectionMethod;
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_common::models::target::ProbeTarget;
use nameleak_common::probe;
use tokio::net::TcpStream;

use super::ProbeStrategy;
use super::multicast::MdnsQuery;
use super::resolve::{self, Lookup, Resolver};

/// The port an `https://` fetch would connect to.
pub const FETCH_PORT: u16 = 443;

/// Resolve-then-connect, the way a cross-origin `fetch()` behaves.
///
/// A name that does not resolve fails before any packet leaves. A name that
/// does resolve gets a connection attempt, and any definite answer to that
/// attempt (accept, refuse, reset, unreachable) proves the resolution.
#[derive(Clone)]
pub struct FetchProbe {
    port: u16,
    resolver: Resolver,
}

impl FetchProbe {
    pub fn new() -> Self {
        Self::with_port(FETCH_PORT)
    }

    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            resolver: Resolver::new(),
        }
    }

    /// Asks `.local` names from `host_candidates` to `responder` instead of
    /// the local interfaces and the mDNS group.
    pub fn with_mdns_responder(
        mut self,
        host_candidates: Vec<Ipv4Addr>,
        responder: SocketAddr,
    ) -> Self {
        let query = MdnsQuery::new(host_candidates).with_responder(responder);
        self.resolver = self.resolver.with_mdns(query);
        self
    }
}

impl Default for FetchProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProbeStrategy for FetchProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Fetch
    }

    async fn probe(&self, target: &ProbeTarget, timeout: Duration) -> ProbeOutcome {
        let hostname: &str = target.hostname();
        let addrs: Vec<SocketAddr> = match self.resolver.lookup(hostname, self.port, timeout).await {
            Lookup::Found(addrs) => addrs,
            Lookup::Missing => return ProbeOutcome::NotResolved,
            Lookup::Failed(outcome) => return outcome,
        };

        let start: Instant = Instant::now();
        match TcpStream::connect(addrs.as_slice()).await {
            Ok(_) => {
                probe!("{hostname} accepted after {:?}", start.elapsed());
                ProbeOutcome::Resolved
            }
            Err(e) => {
                probe!("{hostname} answered with '{e}' after {:?}", start.elapsed());
                resolve::classify_error(&e)
            }
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
