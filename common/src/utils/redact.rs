// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Utilities for privacy-preserving output.
//!
//! A detection run produces exactly the kind of data people do not want in a
//! screenshot: a first name and the hostname carrying it. These helpers mask
//! both while keeping enough shape to stay recognisable.

use crate::models::device::APPLE_DEVICES;

const MASK: &str = "XXXXX";

/// Masks a candidate name, keeping only its first character.
///
/// # Examples
/// ```
/// use nameleak_common::utils::redact;
///
/// assert_eq!(redact::name("Johanna"), "JXXXXX");
/// assert_eq!(redact::name(""), "XXXXX");
/// ```
pub fn name(name: &str) -> String {
    match name.chars().next() {
        Some(first) => format!("{first}{MASK}"),
        None => MASK.to_string(),
    }
}

/// Redacts a hostname to protect privacy while maintaining some recognizability.
///
/// For `.local` names only a device model at either end of the label stays
/// visible. A bare model name
/// carries no name and is kept whole; a label without a known model is masked
/// entirely. Other hostnames keep their first 2 and last 2 characters, and
/// very short labels (<= 4 chars) are masked entirely.
///
/// # Examples
/// ```
/// use nameleak_common::utils::redact;
///
/// assert_eq!(redact::hostname("johns-macbook-pro.local"), "XXXXX-macbook-pro.local");
/// assert_eq!(redact::hostname("iphone-john.local"), "iphone-XXXXX.local");
/// assert_eq!(redact::hostname("ipad.local"), "ipad.local");
/// assert_eq!(redact::hostname("workstation"), "woXXXXXon");
/// ```
pub fn hostname(host: &str) -> String {
    match host.strip_suffix(".local") {
        Some(label) => format!("{}.local", local_label(label)),
        None => edges(host),
    }
}

fn local_label(label: &str) -> String {
    let lower = label.to_ascii_lowercase();

    let model = APPLE_DEVICES
        .iter()
        .map(|device| device.base_name)
        .filter(|slug| {
            lower == *slug
                || lower.ends_with(&format!("-{slug}"))
                || lower.starts_with(&format!("{slug}-"))
        })
        .max_by_key(|slug| slug.len());

    let Some(slug) = model else {
        return MASK.to_string();
    };

    let len = label.len();
    if lower == slug {
        label.to_string()
    } else if lower.ends_with(&format!("-{slug}")) {
        format!("{MASK}{}", &label[len - slug.len() - 1..])
    } else {
        format!("{}{MASK}", &label[..slug.len() + 1])
    }
}

fn edges(label: &str) -> String {
    let chars: Vec<char> = label.chars().collect();
    let len = chars.len();

    if len <= 4 {
        return MASK.to_string();
    }

    let first_two: String = chars[..2].iter().collect();
    let last_two: String = chars[len - 2..].iter().collect();

    format!("{first_two}{MASK}{last_two}")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
