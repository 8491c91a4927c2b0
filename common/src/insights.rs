// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use rand::seq::SliceRandom;
use rand::{Rng, rng};

/// Operational guidance for the guess command.
const PROBE_TIPS: &[&str] = &[
    "Press 'q' to stop probing and print what we have",
    "The '--redact' flag masks names before you share output",
    "Use '-vv' to watch every single probe outcome",
    "Lower '--concurrency' if your network drops bursts",
    "'--method iframe' only works with '--engine gecko'",
    "'nameleak patterns' prints the default hostname shapes",
    "'--method webrtc' needs '--engine chromium'",
];

/// Background on the leak itself.
const MDNS_TRIVIA: &[&str] = &[
    "mDNS answers .local names without any DNS server",
    "macOS names machines after their owner by default",
    "224.0.0.251:5353 is where every mDNS question goes",
    "Browsers hide ICE addresses behind random .local names",
];

/// Industry jokes and developer humor.
const DEV_HUMOR: &[&str] = &[
    "It's always DNS. Even when it's multicast DNS",
    "Naming things is hard. Guessing them is easier",
    "Works on my machine, which is called Johns-MacBook-Pro",
    "UDP: I'd tell you a joke, but you might not get it",
];

/// Generates a randomized list of UI messages.
///
/// Every slot in the resulting list has a 50% probability of being an
/// operational tip and a 50% probability of being flavor text (trivia/humor),
/// provided both pools still have remaining items.
pub fn get_shuffled_insights() -> Vec<&'static str> {
    let mut rng = rng();

    let mut tips = PROBE_TIPS.to_vec();
    tips.shuffle(&mut rng);

    let mut flavor: Vec<&str> = MDNS_TRIVIA
        .iter()
        .chain(DEV_HUMOR.iter())
        .copied()
        .collect();
    flavor.shuffle(&mut rng);

    let mut output = Vec::with_capacity(tips.len() + flavor.len());

    while !tips.is_empty() && !flavor.is_empty() {
        if rng.random_bool(0.5) {
            output.push(tips.remove(0));
        } else {
            output.push(flavor.remove(0));
        }
    }

    output.extend(tips);
    output.extend(flavor);
    output
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
