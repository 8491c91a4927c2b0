// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Turns candidate names and hostname patterns into concrete probe targets.
//!
//! The walk is template-major: every candidate is rendered into the first
//! template before the second template is touched. Earlier targets are probed
//! first, so the most common hostname shape for every name goes out before any
//! rare shape.
//!
//! A template without the `<name>` placeholder names a device and not a person.
//! It yields exactly one target that is not attributed to any candidate.

use std::collections::HashSet;

use nameleak_common::models::candidate::{CandidateName, PatternTemplate};
use nameleak_common::models::target::ProbeTarget;

/// Expands `templates × candidates` into an ordered, duplicate-free target list.
///
/// Pure and deterministic: the same input always yields the same list.
/// When two (template, candidate) pairs render the same hostname, only the
/// first one is kept along with its association.
pub fn expand(templates: &[PatternTemplate], candidates: &[CandidateName]) -> Vec<ProbeTarget> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut targets: Vec<ProbeTarget> = Vec::new();

    for template in templates {
        if !template.has_placeholder() {
            push_unique(
                &mut targets,
                &mut seen,
                ProbeTarget::device_only(template.as_str()),
            );
            continue;
        }

        for candidate in candidates {
            let hostname: String = template.render(candidate);
            push_unique(
                &mut targets,
                &mut seen,
                ProbeTarget::for_candidate(hostname, candidate.clone()),
            );
        }
    }

    targets
}

fn push_unique(targets: &mut Vec<ProbeTarget>, seen: &mut HashSet<String>, target: ProbeTarget) {
    if seen.insert(target.hostname().to_string()) {
        targets.push(target);
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
    use proptest::prelude::*;

    fn names(list: &[&str]) -> Vec<CandidateName> {
        list.iter().map(|n| CandidateName::from(*n)).collect()
    }

    fn templates(list: &[&str]) -> Vec<PatternTemplate> {
        list.iter().map(|t| PatternTemplate::new(*t)).collect()
    }

    fn hostnames(targets: &[ProbeTarget]) -> Vec<&str> {
        targets.iter().map(|t| t.hostname()).collect()
    }

    #[test]
    fn walks_templates_before_candidates() {
        let targets = expand(
            &templates(&["<name>s-imac.local", "<name>s-iphone.local"]),
            &names(&["Ann", "Bob"]),
        );

        assert_eq!(
            hostnames(&targets),
            vec![
                "Anns-imac.local",
                "Bobs-imac.local",
                "Anns-iphone.local",
                "Bobs-iphone.local",
            ]
        );
        assert_eq!(targets[1].candidate().map(|c| c.as_str()), Some("Bob"));
    }

    #[test]
    fn device_template_yields_one_unattributed_target() {
        let targets = expand(
            &templates(&["imac.local", "<name>-imac.local"]),
            &names(&["Ann", "Bob"]),
        );

        assert_eq!(targets.len(), 3);
        assert!(targets[0].is_device_only());
        assert_eq!(targets[0].hostname(), "imac.local");
        assert!(!targets[1].is_device_only());
    }

    #[test]
    fn colliding_hostnames_keep_first_association() {
        // "<name>" renders "Ann" into "Ann.local" which the literal template also produces
        let targets = expand(
            &templates(&["Ann.local", "<name>.local"]),
            &names(&["Ann", "Bob"]),
        );

        assert_eq!(hostnames(&targets), vec!["Ann.local", "Bob.local"]);
        assert!(targets[0].is_device_only());
    }

    #[test]
    fn duplicate_candidates_collapse() {
        let targets = expand(&templates(&["<name>.local"]), &names(&["Ann", "Ann"]));
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn no_candidates_leaves_only_device_targets() {
        let targets = expand(&templates(&["<name>.local", "ipad.local"]), &[]);
        assert_eq!(hostnames(&targets), vec!["ipad.local"]);
    }

    #[test]
    fn malformed_names_are_rendered_verbatim() {
        let targets = expand(&templates(&["<name>s-imac.local"]), &names(&["Ann Marie"]));
        assert_eq!(targets[0].hostname(), "Ann Maries-imac.local");
    }

    proptest! {
        #[test]
        fn expansion_is_deterministic(
            raw_names in prop::collection::vec("[A-Za-z]{1,8}", 0..8),
            raw_templates in prop::collection::vec("(<name>)?[a-z-]{0,6}(<name>)?\\.local", 0..6),
        ) {
            let candidates: Vec<CandidateName> = raw_names.iter().map(|n| CandidateName::from(n.as_str())).collect();
            let patterns: Vec<PatternTemplate> = raw_templates.iter().map(|t| PatternTemplate::new(t.as_str())).collect();

            let first = expand(&patterns, &candidates);
            let second = expand(&patterns, &candidates);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn hostnames_are_unique_and_bounded(
            raw_names in prop::collection::vec("[A-Za-z]{1,8}", 0..8),
            raw_templates in prop::collection::vec("(<name>)?[a-z-]{0,6}(<name>)?\\.local", 0..6),
        ) {
            let candidates: Vec<CandidateName> = raw_names.iter().map(|n| CandidateName::from(n.as_str())).collect();
            let patterns: Vec<PatternTemplate> = raw_templates.iter().map(|t| PatternTemplate::new(t.as_str())).collect();

            let targets = expand(&patterns, &candidates);
            let unique: HashSet<&str> = targets.iter().map(|t| t.hostname()).collect();
            prop_assert_eq!(unique.len(), targets.len());
            prop_assert!(targets.len() <= patterns.len() * candidates.len().max(1));

            for target in &targets {
                if let Some(candidate) = target.candidate() {
                    prop_assert!(patterns.iter().any(|p| p.render(candidate) == target.hostname()));
                }
            }
        }
    }
}
