// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::{sync::OnceLock, time::Duration};

use crate::terminal::{banner, colors, format};
use anyhow::bail;
use colored::*;
use nameleak_common::{
    config::Config,
    models::outcome::{CandidateEvidence, DetectionResult, ProbeReport},
    success,
};
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

static PRINT: OnceLock<Print> = OnceLock::new();

type Detail = (String, ColoredString);

#[macro_export]
macro_rules! nprint {
    () => {
        $crate::nprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "nameleak::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
    redact: bool,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
            redact: cfg.redact,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ NAMELEAK v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();

        nprint!("{}{}{}", sep, text, sep);
        banner::print();
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            nprint!();
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        nprint!("{}", line);
    }

    /// Prints the outcome of a finished run: the matched name, or the no-match banner.
    pub fn verdict(result: &DetectionResult, total_time: Duration) {
        let p = Self::get();
        let (Some(candidate), Some(target)) = (result.candidate(), result.matched_target()) else {
            Self::no_match(result, total_time);
            return;
        };

        let name: ColoredString = format::candidate(candidate, p.redact);
        if p.q_level > 1 {
            nprint!("{}", name.clear());
            return;
        }

        Self::header("name found");
        let mut details: Vec<Detail> = vec![
            ("Name".to_string(), name),
            ("Hostname".to_string(), format::hostname(target.hostname(), p.redact)),
        ];
        if let Some(label) = format::device_label(candidate, target.hostname(), p.redact) {
            details.push(("Device".to_string(), label));
        }
        details.push((
            "Probes".to_string(),
            result.probes_started.to_string().color(colors::TEXT_DEFAULT),
        ));
        as_tree(details);

        Self::devices(result);
        Self::summary(result, total_time);
    }

    fn no_match(result: &DetectionResult, total_time: Duration) {
        let p = Self::get();
        if p.q_level == 0 && !p.no_banner {
            Self::header("no name matched");
            nprint!("{}", banner::NO_MATCH.red().bold());
        } else {
            nameleak_common::error!(
                "No candidate matched after {} probes",
                result.probes_started
            );
        }
        Self::devices(result);
        if p.q_level == 0 {
            Self::summary(result, total_time);
        }
    }

    /// Device-only hostnames that answered. Useful even when no name matched.
    fn devices(result: &DetectionResult) {
        let p = Self::get();
        let devices = result.resolved_devices();
        if devices.is_empty() || p.q_level > 1 {
            return;
        }

        nprint!();
        print_status("Unnamed devices on this network:");
        let details: Vec<Detail> = devices
            .iter()
            .map(|target| {
                (
                    "Hostname".to_string(),
                    format::hostname(target.hostname(), p.redact),
                )
            })
            .collect();
        as_tree(details);
    }

    fn summary(result: &DetectionResult, total_time: Duration) {
        let p = Self::get();
        let probes: ColoredString = format!("{} probes", result.probes_started).bold().green();
        let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
        let output: String = format!("Detection Complete: {probes} started in {total_time}")
            .color(colors::TEXT_DEFAULT)
            .to_string();

        match p.q_level {
            0 => {
                divider();
                centerln(&output);
            }
            _ => {
                nprint!();
                success!("{output}")
            }
        }
    }

    /// Every per-target outcome in probe order, then the per-name tallies.
    pub fn diagnostics(result: &DetectionResult) {
        let p = Self::get();
        Self::header("probe outcomes");
        for report in &result.outcomes {
            outcome_line(report, p.redact);
        }

        let evidence: Vec<CandidateEvidence> = result.evidence();
        if evidence.is_empty() {
            return;
        }
        Self::header("evidence per name");
        for entry in &evidence {
            evidence_line(entry, p.redact);
        }
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        nprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

fn outcome_line(report: &ProbeReport, redact: bool) {
    let idx_str: String = format!("[{}]", report.index.to_string().color(colors::ACCENT));
    let host: ColoredString = format::hostname(report.target.hostname(), redact);
    let outcome: ColoredString = format::outcome(&report.outcome);

    let left_width: usize = format!("[{}] ", report.index).width() + host.width();
    let padding: String = " ".repeat(TOTAL_WIDTH.saturating_sub(left_width + outcome.width()));

    nprint!(
        "{} {}{}{}",
        idx_str.color(colors::SEPARATOR),
        host,
        padding,
        outcome
    );
}

fn evidence_line(entry: &CandidateEvidence, redact: bool) {
    let name: ColoredString = format::candidate(&entry.candidate, redact);
    let tally: String = format!(
        "{} resolved, {} not, {} inconclusive",
        entry.resolved, entry.not_resolved, entry.inconclusive
    );
    print_status(format!("{}: {}", name, tally.color(colors::TEXT_DEFAULT)));
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    nprint!("{}", sep);
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    nprint!(
        "{} {}",
        ">".color(colors::SEPARATOR),
        msg.as_ref().color(colors::TEXT_DEFAULT)
    );
}

pub fn as_tree(details: Vec<Detail>) {
    let padding_width: usize = "Hostname".len();

    for (i, (key, value)) in details.iter().enumerate() {
        let last: bool = i + 1 == details.len();
        let branch: ColoredString = if !last { "├─" } else { "└─" }.bright_black();

        let dots_count: usize = padding_width.saturating_sub(key.len());
        let dots: ColoredString = ".".repeat(dots_count).color(colors::SEPARATOR);

        nprint!(
            " {} {}{}{} {}",
            branch,
            key.color(colors::TEXT_DEFAULT),
            dots,
            ":".color(colors::SEPARATOR),
            value
        );
    }
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    nprint!("{}{}{}", space, msg, space);
}
