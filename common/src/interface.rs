// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Local interface enumeration.
//!
//! A WebRTC agent gathers one "host candidate" per usable local address before
//! it talks to anyone. We do the same to decide which addresses multicast
//! queries leave from.

use std::net::Ipv4Addr;

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;

use crate::info;

/// IPv4 host candidates of every up, non-loopback interface.
///
/// Wired interfaces come first, mirroring the order ICE would prefer them.
pub fn host_candidates() -> Vec<Ipv4Addr> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    let candidates = candidates_from(interfaces);

    let unit = if candidates.len() == 1 {
        "candidate"
    } else {
        "candidates"
    };
    info!(
        verbosity = 1,
        "Gathered {} host {unit}",
        candidates.len()
    );

    candidates
}

fn candidates_from(mut interfaces: Vec<NetworkInterface>) -> Vec<Ipv4Addr> {
    interfaces.retain(is_candidate_interface);
    interfaces.sort_by_key(|i| if i.name.starts_with('e') { 0 } else { 1 });

    interfaces
        .iter()
        .flat_map(|i| i.ips.iter())
        .filter_map(|net| match net {
            IpNetwork::V4(v4) if !v4.ip().is_loopback() && !v4.ip().is_unspecified() => {
                Some(v4.ip())
            }
            _ => None,
        })
        .collect()
}

fn is_candidate_interface(intf: &NetworkInterface) -> bool {
    intf.is_up() && !intf.is_loopback() && !intf.ips.is_empty()
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
    use pnet::ipnetwork::Ipv4Network;

    const IFF_UP: u32 = 0x1;
    const IFF_LOOPBACK: u32 = 0x8;

    fn interface(name: &str, ip: Ipv4Addr, flags: u32) -> NetworkInterface {
        NetworkInterface {
            name: name.to_string(),
            description: String::new(),
            index: 1,
            mac: None,
            ips: vec![IpNetwork::V4(Ipv4Network::new(ip, 24).unwrap())],
            flags,
        }
    }

    #[test]
    fn loopback_and_down_interfaces_are_skipped() {
        let interfaces = vec![
            interface("lo", Ipv4Addr::LOCALHOST, IFF_UP | IFF_LOOPBACK),
            interface("wlan0", Ipv4Addr::new(192, 168, 1, 20), 0),
            interface("wlan1", Ipv4Addr::new(192, 168, 2, 20), IFF_UP),
        ];
        assert_eq!(candidates_from(interfaces), vec![Ipv4Addr::new(192, 168, 2, 20)]);
    }

    #[test]
    fn wired_candidates_come_first() {
        let interfaces = vec![
            interface("wlan0", Ipv4Addr::new(192, 168, 1, 20), IFF_UP),
            interface("eth0", Ipv4Addr::new(10, 0, 0, 5), IFF_UP),
        ];
        assert_eq!(
            candidates_from(interfaces),
            vec![Ipv4Addr::new(10, 0, 0, 5), Ipv4Addr::new(192, 168, 1, 20)]
        );
    }
}
