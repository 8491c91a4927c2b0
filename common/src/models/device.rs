// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Apple Device Catalogue
//!
//! macOS and iOS derive the mDNS name of a machine from the owner's name and
//! the device model, e.g. "John's MacBook Pro" becomes `Johns-MacBook-Pro.local`.
//! A fresh, unnamed device falls back to the bare model (`MacBook-Pro.local`).
//!
//! This catalogue feeds the default pattern set and turns a matched hostname
//! back into a readable device label.

use crate::models::candidate::{CandidateName, NAME_PLACEHOLDER_TOKEN, PatternTemplate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppleDevice {
    /// Lowercase model slug as it appears in the hostname.
    pub base_name: &'static str,
    pub display_name: &'static str,
}

pub const APPLE_DEVICES: &[AppleDevice] = &[
    AppleDevice {
        base_name: "macbook-pro",
        display_name: "MacBook Pro",
    },
    AppleDevice {
        base_name: "macbook-air",
        display_name: "MacBook Air",
    },
    AppleDevice {
        base_name: "macbook",
        display_name: "MacBook",
    },
    AppleDevice {
        base_name: "imac",
        display_name: "iMac",
    },
    AppleDevice {
        base_name: "mac-mini",
        display_name: "Mac mini",
    },
    AppleDevice {
        base_name: "mac-pro",
        display_name: "Mac Pro",
    },
    AppleDevice {
        base_name: "mac-studio",
        display_name: "Mac Studio",
    },
    AppleDevice {
        base_name: "iphone",
        display_name: "iPhone",
    },
    AppleDevice {
        base_name: "ipad",
        display_name: "iPad",
    },
];

/// Base mDNS names of every catalogued device, in catalogue order.
pub fn base_names() -> Vec<&'static str> {
    APPLE_DEVICES.iter().map(|device| device.base_name).collect()
}

/// The three hostname shapes Apple devices use, per catalogued model:
/// `<name>s-<device>.local`, `<device>-<name>.local` and `<device>.local`.
pub fn default_patterns() -> Vec<PatternTemplate> {
    APPLE_DEVICES
        .iter()
        .flat_map(|device| {
            let base = device.base_name;
            [
                format!("{NAME_PLACEHOLDER_TOKEN}s-{base}.local"),
                format!("{base}-{NAME_PLACEHOLDER_TOKEN}.local"),
                format!("{base}.local"),
            ]
        })
        .map(PatternTemplate::from)
        .collect()
}

/// Finds the model a hostname refers to. The longest matching slug wins, so
/// `macbook-pro` beats `macbook`; ties go to the earlier catalogue entry.
pub fn identify(hostname: &str) -> Option<&'static AppleDevice> {
    let hostname = hostname.to_ascii_lowercase();
    APPLE_DEVICES
        .iter()
        .rev()
        .filter(|device| hostname.contains(device.base_name))
        .max_by_key(|device| device.base_name.len())
}

/// Like [`identify`], but only looks at the part of `hostname` that the
/// candidate did not fill in. A name such as `Ipadma` must not make
/// `ipadmas-imac.local` an iPad.
pub fn identify_owned(candidate: &CandidateName, hostname: &str) -> Option<&'static AppleDevice> {
    let host = hostname.to_ascii_lowercase();
    let name = candidate.as_str().to_ascii_lowercase();
    if name.is_empty() {
        return identify(&host);
    }

    let spots: Vec<usize> = host.match_indices(name.as_str()).map(|(at, _)| at).collect();
    if spots.is_empty() {
        return identify(&host);
    }

    // The name may occur twice (`imac-mac.local`), so try each spot
    spots
        .into_iter()
        .filter_map(|at| identify(&format!("{}/{}", &host[..at], &host[at + name.len()..])))
        .fold(None, |best: Option<&'static AppleDevice>, device| match best {
            Some(best) if best.base_name.len() >= device.base_name.len() => Some(best),
            _ => Some(device),
        })
}

impl AppleDevice {
    /// `Ann's MacBook Pro` for owner `Ann`.
    pub fn label_for(&self, owner: &str) -> String {
        format!("{owner}'s {}", self.display_name)
    }
}

/// Renders the label macOS would show for the device, e.g. `Ann's MacBook Pro`.
pub fn device_label(candidate: &CandidateName, hostname: &str) -> Option<String> {
    identify_owned(candidate, hostname).map(|device| device.label_for(candidate.as_str()))
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

    #[test]
    fn default_patterns_cover_three_shapes_per_device() {
        let patterns = default_patterns();
        assert_eq!(patterns.len(), APPLE_DEVICES.len() * 3);
        assert_eq!(patterns[0].as_str(), "<name>s-macbook-pro.local");
        assert_eq!(patterns[1].as_str(), "macbook-pro-<name>.local");
        assert_eq!(patterns[2].as_str(), "macbook-pro.local");
        assert!(!patterns[2].has_placeholder());
    }

    #[test]
    fn identify_prefers_longest_slug() {
        let device = identify("Anns-MacBook-Pro.local").unwrap();
        assert_eq!(device.display_name, "MacBook Pro");

        let device = identify("anns-macbook.local").unwrap();
        assert_eq!(device.display_name, "MacBook");
    }

    #[test]
    fn identify_unknown_hostname() {
        assert!(identify("raspberrypi.local").is_none());
    }

    #[test]
    fn label_uses_owner_form() {
        let name = CandidateName::from("Ann");
        assert_eq!(
            device_label(&name, "anns-macbook-pro.local").as_deref(),
            Some("Ann's MacBook Pro")
        );
        assert_eq!(
            device_label(&name, "iphone-ann.local").as_deref(),
            Some("Ann's iPhone")
        );
    }

    #[test]
    fn name_text_is_not_mistaken_for_a_device() {
        let owner = CandidateName::from("Ipadma");
        assert_eq!(
            device_label(&owner, "ipadmas-imac.local").as_deref(),
            Some("Ipadma's iMac")
        );

        let owner = CandidateName::from("Macbookie");
        assert_eq!(
            device_label(&owner, "iphone-macbookie.local").as_deref(),
            Some("Macbookie's iPhone")
        );
    }

    #[test]
    fn name_inside_the_slug_still_finds_the_device() {
        let owner = CandidateName::from("mac");
        assert_eq!(
            identify_owned(&owner, "imac-mac.local").map(|d| d.display_name),
            Some("iMac")
        );
    }

    #[test]
    fn equal_length_slugs_prefer_catalogue_order() {
        let device = identify("imac-ipad.local").unwrap();
        assert_eq!(device.base_name, "imac");
    }

    #[test]
    fn base_names_follow_catalogue_order() {
        let names = base_names();
        assert_eq!(names.first(), Some(&"macbook-pro"));
        assert_eq!(names.len(), APPLE_DEVICES.len());
    }
}
