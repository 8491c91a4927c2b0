// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! One-shot multicast DNS (RFC 6762 §5.1).
//!
//! A query is sent from an ephemeral port to the mDNS group with the
//! unicast-response bit set, and responders answer straight back to that port.
//! No long-lived listener on 5353 is needed.

use std::net::{IpAddr, Ipv4Addr};

use anyhow::{Context, Result, anyhow, ensure};
use dns_parser::{Builder, Packet, QueryClass, QueryType, RData};

pub const MDNS_GROUP_V4: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
pub const MDNS_PORT: u16 = 5353;

const MAX_NAME_LEN: usize = 253;
/// `dns-parser` asserts labels are shorter than this.
const MAX_LABEL_LEN: usize = 63;

/// `true` for names inside the `.local` zone, the only zone mDNS serves.
pub fn is_local_name(hostname: &str) -> bool {
    let name = trim_root(hostname).to_ascii_lowercase();
    name.ends_with(".local") && name.len() > ".local".len()
}

/// Rejects names that cannot be encoded as a DNS question.
pub fn validate_name(hostname: &str) -> Result<()> {
    let name = trim_root(hostname);
    ensure!(!name.is_empty(), "empty hostname");
    ensure!(name.len() <= MAX_NAME_LEN, "hostname longer than {MAX_NAME_LEN} bytes");

    for label in name.split('.') {
        ensure!(!label.is_empty(), "empty label in '{name}'");
        ensure!(
            label.len() < MAX_LABEL_LEN,
            "label '{label}' is longer than {} bytes",
            MAX_LABEL_LEN - 1
        );
    }
    Ok(())
}

/// Builds an A question for `hostname` with the QU bit set.
pub fn create_query(hostname: &str, id: u16) -> Result<Vec<u8>> {
    validate_name(hostname)?;

    let mut builder: Builder = Builder::new_query(id, false);
    builder.add_question(trim_root(hostname), true, QueryType::A, QueryClass::IN);

    builder
        .build()
        .map_err(|_| anyhow!("mDNS query for '{hostname}' was truncated"))
}

/// Addresses a response assigns to `hostname`.
///
/// Records for other names (responders like to volunteer extras) are ignored,
/// as are packets that are themselves queries.
pub fn answer_addresses(data: &[u8], hostname: &str) -> Result<Vec<IpAddr>> {
    let packet = Packet::parse(data).context("failed to parse mDNS packet")?;
    if packet.header.query {
        return Ok(Vec::new());
    }

    let wanted = trim_root(hostname);
    let mut ips: Vec<IpAddr> = Vec::new();

    for record in packet.answers.iter().chain(packet.additional.iter()) {
        let owner = record.name.to_string();
        if !trim_root(&owner).eq_ignore_ascii_case(wanted) {
            continue;
        }
        match &record.data {
            RData::A(a) => ips.push(IpAddr::V4(a.0)),
            RData::AAAA(aaaa) => ips.push(IpAddr::V6(aaaa.0)),
            _ => {}
        }
    }

    Ok(ips)
}

fn trim_root(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
