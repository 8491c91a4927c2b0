// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;
use nameleak_common::config::Config;
use nameleak_common::models::candidate::PatternTemplate;
use nameleak_common::models::device;

use crate::{
    nprint,
    terminal::{colors, print::Print},
};

/// Prints the default pattern set, one template per line.
pub fn patterns(cfg: &Config) -> anyhow::Result<()> {
    let patterns: Vec<PatternTemplate> = device::default_patterns();

    if cfg.quiet > 1 {
        for pattern in &patterns {
            nprint!("{}", pattern);
        }
        return Ok(());
    }

    Print::header("default hostname patterns");
    for pattern in &patterns {
        let color = if pattern.has_placeholder() {
            colors::PRIMARY
        } else {
            colors::SECONDARY
        };
        nprint!(" {}", pattern.as_str().color(color));
    }
    Ok(())
}
