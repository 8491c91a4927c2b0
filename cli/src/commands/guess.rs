// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::fs;
use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;
use nameleak_common::config::{Config, DetectionConfig};
use nameleak_common::error::DetectError;
use nameleak_common::models::candidate::{self, CandidateName, PatternTemplate};
use nameleak_common::models::device;
use nameleak_common::models::method::{DetectionMethod, Environment};
use nameleak_common::utils::input::InterruptListener;
use nameleak_common::{info, warn};
use nameleak_core::{DetectionEngine, expander};
use tokio_util::sync::CancellationToken;
use tracing::info_span;

use crate::commands::GuessArgs;
use crate::terminal::{colors, print::Print, spinner::SpinnerGuard};

pub async fn guess(args: &GuessArgs, cfg: &Config) -> anyhow::Result<()> {
    let candidates: Vec<CandidateName> = load_candidates(args)?;
    let templates: Vec<PatternTemplate> = load_templates(args);

    let environment = Environment::new(args.engine);
    let method: DetectionMethod = args
        .method
        .unwrap_or_else(|| DetectionMethod::default_for(&environment));

    let detection = DetectionConfig::default()
        .with_environment(environment)
        .with_concurrency(args.concurrency)
        .with_probe_timeout(Duration::from_millis(args.timeout_ms));
    let engine = DetectionEngine::new(detection);

    info!(
        verbosity = 1,
        "Guessing among {} names with {} patterns ({method} on {})",
        candidates.len(),
        templates.len(),
        environment.engine()
    );

    Print::header("guessing the hostname owner");

    let token: CancellationToken = engine.cancellation_token();
    let _listener = (!cfg.disable_input).then(|| InterruptListener::spawn(token.clone()));
    let ctrl_c = spawn_ctrl_c_handler(token);

    let hostnames: usize = expander::expand(&templates, &candidates).len();
    let start_time: Instant = Instant::now();
    let spinner: SpinnerGuard = run_spinner(hostnames);

    let result = engine.detect(&candidates, &templates, method).await;

    drop(spinner);
    ctrl_c.abort();
    let total_time: Duration = start_time.elapsed();

    match result {
        Ok(result) => {
            Print::verdict(&result, total_time);
            if args.diagnostics {
                Print::diagnostics(&result);
            }
            Ok(())
        }
        Err(DetectError::Cancelled) => {
            warn!("Stopped by user after {:.2}s", total_time.as_secs_f64());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// `--name` values first, then the file, duplicates dropped.
fn load_candidates(args: &GuessArgs) -> anyhow::Result<Vec<CandidateName>> {
    let mut names: Vec<CandidateName> = args
        .names
        .iter()
        .flat_map(|raw| candidate::parse_candidates(raw))
        .collect();

    if let Some(path) = &args.names_file {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read names from {}", path.display()))?;
        names.extend(candidate::parse_candidates(&contents));
    }

    Ok(candidate::dedup_candidates(names))
}

fn load_templates(args: &GuessArgs) -> Vec<PatternTemplate> {
    if args.patterns.is_empty() {
        return device::default_patterns();
    }
    args.patterns
        .iter()
        .flat_map(|raw| candidate::parse_templates(raw))
        .collect()
}

/// Ctrl-C outside raw mode arrives as SIGINT.
fn spawn_ctrl_c_handler(token: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

fn run_spinner(hostnames: usize) -> SpinnerGuard {
    let span = info_span!("guess", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), move |elapsed| {
        let count = hostnames.to_string().green().bold();
        let label = if hostnames == 1 { "hostname" } else { "hostnames" };
        format!(
            "Racing {} {}, {:.1}s so far...",
            count,
            label,
            elapsed.as_secs_f64()
        )
        .color(colors::TEXT_DEFAULT)
        .italic()
    })
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
    use crate::commands::{CommandLine, Commands};
    use clap::Parser;

    fn guess_args(argv: &[&str]) -> GuessArgs {
        let mut full = vec!["nameleak", "guess"];
        full.extend_from_slice(argv);
        match CommandLine::try_parse_from(full).unwrap().command {
            Commands::Guess(args) => args,
            Commands::Patterns => panic!("expected guess"),
        }
    }

    #[test]
    fn names_are_trimmed_and_deduplicated() {
        let args = guess_args(&["-n", " Ann ", "Bob", "Ann"]);
        let names = load_candidates(&args).unwrap();
        assert_eq!(names, vec![CandidateName::from("Ann"), CandidateName::from("Bob")]);
    }

    #[test]
    fn names_file_is_appended() {
        let path = std::env::temp_dir().join(format!("nameleak-names-{}.txt", std::process::id()));
        fs::write(&path, "Cy\n\nAnn\n").unwrap();

        let path_str = path.to_string_lossy().to_string();
        let args = guess_args(&["-n", "Ann", "--names-file", &path_str]);
        let names = load_candidates(&args).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(names, vec![CandidateName::from("Ann"), CandidateName::from("Cy")]);
    }

    #[test]
    fn missing_names_file_is_an_error() {
        let args = guess_args(&["--names-file", "/nonexistent/nameleak/names.txt"]);
        assert!(load_candidates(&args).is_err());
    }

    #[test]
    fn device_patterns_are_the_default() {
        let args = guess_args(&["-n", "Ann"]);
        assert_eq!(load_templates(&args), device::default_patterns());

        let args = guess_args(&["-n", "Ann", "-p", "<name>-pc.local"]);
        assert_eq!(load_templates(&args), vec![PatternTemplate::new("<name>-pc.local")]);
    }
}
