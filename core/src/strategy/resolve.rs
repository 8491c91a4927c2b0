// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::TokioResolver;
use hickory_resolver::config::ResolverConfig;
use hickory_resolver::name_server::TokioConnectionProvider;
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_common::{debug, probe};
use nameleak_protocols::mdns;

use super::multicast::{Answer, MdnsQuery};

/// Result of turning a hostname into socket addresses.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Lookup {
    Found(Vec<SocketAddr>),
    Missing,
    Failed(ProbeOutcome),
}

/// In-process name resolution.
///
/// Unicast names go to hickory, `.local` names to a one-shot mDNS question.
/// Both run entirely inside the returned future, so dropping it at the
/// scheduler's timeout aborts the lookup as well.
#[derive(Clone)]
pub(super) struct Resolver {
    dns: TokioResolver,
    mdns: MdnsQuery,
}

impl Resolver {
    pub(super) fn new() -> Self {
        Self {
            dns: system_resolver(),
            mdns: MdnsQuery::from_interfaces(),
        }
    }

    pub(super) fn with_mdns(mut self, mdns: MdnsQuery) -> Self {
        self.mdns = mdns;
        self
    }

    /// Resolves `hostname` within `budget`. `.local` names get half of it,
    /// leaving the rest for whatever the caller does with the addresses.
    pub(super) async fn lookup(&self, hostname: &str, port: u16, budget: Duration) -> Lookup {
        if let Ok(ip) = hostname.parse::<IpAddr>() {
            return Lookup::Found(vec![SocketAddr::new(ip, port)]);
        }

        let ips: Vec<IpAddr> = if mdns::is_local_name(hostname) {
            match self.mdns.ask(hostname, budget / 2).await {
                Answer::Addresses(ips) => ips,
                Answer::Silence => {
                    probe!("{hostname} got no mDNS answer");
                    Vec::new()
                }
                Answer::InvalidName(why) => {
                    probe!("{hostname} cannot be queried: {why}");
                    Vec::new()
                }
                Answer::NoHostCandidates => {
                    return Lookup::Failed(ProbeOutcome::unsupported(
                        "no interface to send mDNS questions from",
                    ));
                }
                Answer::Failed(why) => return Lookup::Failed(ProbeOutcome::ambiguous(why)),
            }
        } else {
            // Fully qualified, so search domains are never appended
            let fqdn = format!("{}.", hostname.trim_end_matches('.'));
            match self.dns.lookup_ip(fqdn).await {
                Ok(found) => found.iter().collect(),
                Err(e) => {
                    probe!("{hostname} did not resolve: {e}");
                    Vec::new()
                }
            }
        };

        if ips.is_empty() {
            return Lookup::Missing;
        }
        Lookup::Found(ips.into_iter().map(|ip| SocketAddr::new(ip, port)).collect())
    }
}

fn system_resolver() -> TokioResolver {
    match TokioResolver::builder_tokio() {
        Ok(builder) => builder.build(),
        Err(e) => {
            debug!("System resolver settings unavailable ({e}), using defaults");
            TokioResolver::builder_with_config(
                ResolverConfig::default(),
                TokioConnectionProvider::default(),
            )
            .build()
        }
    }
}

/// Reads a socket error from a host whose name already resolved.
///
/// A refusal, a reset or an unreachable route all mean a concrete address was
/// tried, so the name resolved. Anything else is not evidence either way.
pub(super) fn classify_error(err: &io::Error) -> ProbeOutcome {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable => ProbeOutcome::Resolved,
        io::ErrorKind::TimedOut => ProbeOutcome::timeout(),
        _ => ProbeOutcome::ambiguous(err.to_string()),
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
