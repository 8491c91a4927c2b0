// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use futures::StreamExt;
use futures::stream::FuturesUnordered;
use nameleak_common::interface;
use nameleak_common::probe;
use nameleak_protocols::mdns;
use tokio::net::UdpSocket;

const MAX_DATAGRAM: usize = 1500;

/// What a one-shot mDNS question got back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Answer {
    Addresses(Vec<IpAddr>),
    Silence,
    InvalidName(String),
    NoHostCandidates,
    Failed(String),
}

/// Asks a `.local` name once from every host candidate.
///
/// Each socket lives inside the future returned by [`ask`](Self::ask), so
/// dropping that future closes all of them.
#[derive(Debug, Clone)]
pub(super) struct MdnsQuery {
    host_candidates: Vec<Ipv4Addr>,
    responder: SocketAddr,
}

impl MdnsQuery {
    pub(super) fn new(host_candidates: Vec<Ipv4Addr>) -> Self {
        Self {
            host_candidates,
            responder: SocketAddr::from((mdns::MDNS_GROUP_V4, mdns::MDNS_PORT)),
        }
    }

    pub(super) fn from_interfaces() -> Self {
        Self::new(interface::host_candidates())
    }

    pub(super) fn with_responder(mut self, responder: SocketAddr) -> Self {
        self.responder = responder;
        self
    }

    pub(super) async fn ask(&self, hostname: &str, wait: Duration) -> Answer {
        if self.host_candidates.is_empty() {
            return Answer::NoHostCandidates;
        }

        let query: Vec<u8> = match mdns::create_query(hostname, rand::random()) {
            Ok(query) => query,
            Err(e) => return Answer::InvalidName(e.to_string()),
        };

        let mut last_error: Option<io::Error> = None;
        let mut listeners = FuturesUnordered::new();
        for ip in &self.host_candidates {
            match self.send_query(*ip, &query).await {
                Ok(socket) => listeners.push(await_answer(socket, hostname)),
                Err(e) => {
                    probe!("Host candidate {ip} failed to query {hostname}: {e}");
                    last_error = Some(e);
                }
            }
        }

        if listeners.is_empty() {
            return Answer::Failed(describe(last_error));
        }

        let answered = tokio::time::timeout(wait, async {
            while let Some(result) = listeners.next().await {
                match result {
                    Ok(ips) => return Answer::Addresses(ips),
                    Err(e) => last_error = Some(e),
                }
            }
            Answer::Failed(describe(last_error))
        })
        .await;

        answered.unwrap_or(Answer::Silence)
    }

    async fn send_query(&self, local_ip: Ipv4Addr, query: &[u8]) -> io::Result<UdpSocket> {
        let socket = UdpSocket::bind(SocketAddr::from((local_ip, 0))).await?;
        if self.responder.ip().is_multicast() {
            socket.set_multicast_loop_v4(true)?;
        }
        socket.send_to(query, self.responder).await?;
        Ok(socket)
    }
}

async fn await_answer(socket: UdpSocket, hostname: &str) -> io::Result<Vec<IpAddr>> {
    let mut buf = [0u8; MAX_DATAGRAM];
    loop {
        let (len, from) = socket.recv_from(&mut buf).await?;
        match mdns::answer_addresses(&buf[..len], hostname) {
            Ok(ips) if !ips.is_empty() => {
                probe!("{hostname} answered by {from}: {ips:?}");
                return Ok(ips);
            }
            Ok(_) => {}
            Err(e) => probe!("Ignoring datagram from {from}: {e}"),
        }
    }
}

fn describe(err: Option<io::Error>) -> String {
    err.map_or_else(|| "no socket".to_string(), |e| e.to_string())
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

    const LOOPBACK: Ipv4Addr = Ipv4Addr::LOCALHOST;

    #[tokio::test]
    async fn answer_carries_the_addresses() {
        let addr = responder::spawn("anns-imac.local", Ipv4Addr::new(192, 168, 1, 42)).await;
        let query = MdnsQuery::new(vec![LOOPBACK]).with_responder(addr);

        let answer = query.ask("anns-imac.local", Duration::from_secs(2)).await;
        assert_eq!(
            answer,
            Answer::Addresses(vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 42))])
        );
    }

    #[tokio::test]
    async fn silence_ends_at_the_wait() {
        let (_socket, addr) = responder::silent().await;
        let query = MdnsQuery::new(vec![LOOPBACK]).with_responder(addr);

        let answer = query.ask("anns-imac.local", Duration::from_millis(100)).await;
        assert_eq!(answer, Answer::Silence);
    }

    #[tokio::test]
    async fn no_candidates_sends_nothing() {
        let query = MdnsQuery::new(Vec::new());
        let answer = query.ask("anns-imac.local", Duration::from_millis(100)).await;
        assert_eq!(answer, Answer::NoHostCandidates);
    }
}
