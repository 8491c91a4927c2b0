// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Candidate Names & Pattern Templates
//!
//! The two user supplied inputs of a detection run.
//!
//! * A [`CandidateName`] is one personal name we suspect the machine owner has.
//! * A [`PatternTemplate`] is a hostname with a `<name>` hole in it
//!   (e.g. `<name>s-macbook-pro.local`). Templates without the hole are still
//!   valid and describe device-only probes.
//!
//! Both are immutable once built. The form layer hands us newline separated
//! text, so this module also owns the line parsing.

use std::collections::HashSet;
use std::fmt;

/// The literal substring replaced by a candidate name.
pub const NAME_PLACEHOLDER_TOKEN: &str = "<name>";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateName(String);

impl CandidateName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CandidateName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for CandidateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternTemplate(String);

impl PatternTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `false` means the template is a literal, device-only hostname.
    pub fn has_placeholder(&self) -> bool {
        self.0.contains(NAME_PLACEHOLDER_TOKEN)
    }

    /// Substitutes the candidate verbatim. No escaping, no case folding.
    pub fn render(&self, candidate: &CandidateName) -> String {
        self.0.replace(NAME_PLACEHOLDER_TOKEN, candidate.as_str())
    }
}

impl fmt::Display for PatternTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PatternTemplate {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PatternTemplate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Splits form text into trimmed, non-empty lines.
pub fn lines(input: &str) -> impl Iterator<Item = &str> {
    input.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Parses newline separated names. Duplicates collapse, the first one wins.
pub fn parse_candidates(input: &str) -> Vec<CandidateName> {
    dedup_candidates(lines(input).map(CandidateName::from))
}

/// Parses newline separated templates, keeping their order.
pub fn parse_templates(input: &str) -> Vec<PatternTemplate> {
    lines(input).map(PatternTemplate::from).collect()
}

/// Removes repeated names while keeping first-seen order.
pub fn dedup_candidates<I>(candidates: I) -> Vec<CandidateName>
where
    I: IntoIterator<Item = CandidateName>,
{
    let mut seen: HashSet<CandidateName> = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
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
    fn render_substitutes_verbatim() {
        let template = PatternTemplate::from("<name>s-macbook-pro.local");
        let name = CandidateName::from("Ann Marie");
        assert_eq!(template.render(&name), "Ann Maries-macbook-pro.local");
    }

    #[test]
    fn literal_template_has_no_placeholder() {
        assert!(!PatternTemplate::from("imac.local").has_placeholder());
        assert!(PatternTemplate::from("imac-<name>.local").has_placeholder());
    }

    #[test]
    fn parse_candidates_trims_and_skips_blank_lines() {
        let names = parse_candidates("  John\n\nKevin \r\n\tAlex\n");
        let names: Vec<&str> = names.iter().map(CandidateName::as_str).collect();
        assert_eq!(names, vec!["John", "Kevin", "Alex"]);
    }

    #[test]
    fn parse_candidates_collapses_duplicates() {
        let names = parse_candidates("Bo\nAnn\nBo\nann");
        let names: Vec<&str> = names.iter().map(CandidateName::as_str).collect();
        // Case matters: "ann" and "Ann" are different candidates.
        assert_eq!(names, vec!["Bo", "Ann", "ann"]);
    }

    #[test]
    fn parse_templates_keeps_order_and_duplicates() {
        let templates = parse_templates("<name>.local\nimac.local\n<name>.local");
        assert_eq!(templates.len(), 3);
        assert_eq!(templates[1].as_str(), "imac.local");
    }
}
