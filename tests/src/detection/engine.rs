// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::time::Duration;

use nameleak_common::config::{DetectionConfig, FormInput};
use nameleak_common::error::{ConfigError, DetectError};
use nameleak_common::models::candidate::{self, CandidateName, PatternTemplate};
use nameleak_common::models::device;
use nameleak_common::models::method::{DetectionMethod, EngineFamily, Environment};
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_core::DetectionEngine;

use crate::utils::ScriptedProbe;

const QUICK: Duration = Duration::from_millis(5);

fn candidates() -> Vec<CandidateName> {
    candidate::parse_candidates("Ann\nBob\nCy\nDee\nEve\n")
}

#[tokio::test]
async fn match_on_default_patterns_names_the_device() {
    let probe = ScriptedProbe::default()
        .answer("Anns-macbook-pro.local", QUICK, ProbeOutcome::NotResolved)
        .answer("Bobs-macbook-pro.local", QUICK, ProbeOutcome::NotResolved)
        .answer("Cys-macbook-pro.local", QUICK, ProbeOutcome::Resolved)
        .answer("Dees-macbook-pro.local", Duration::from_millis(500), ProbeOutcome::NotResolved)
        .answer("Eves-macbook-pro.local", QUICK, ProbeOutcome::NotResolved);

    let engine = DetectionEngine::new(DetectionConfig::default().with_concurrency(2));
    let result = engine
        .detect_with_strategy(&candidates(), &device::default_patterns(), &probe)
        .await
        .unwrap();

    assert_eq!(result.candidate().map(|c| c.as_str()), Some("Cy"));
    assert_eq!(result.device_label().as_deref(), Some("Cy's MacBook Pro"));
    assert_eq!(result.probes_started, 4);
    assert!(!probe.seen().contains(&"Eves-macbook-pro.local".to_string()));
    assert!(!probe.seen().iter().any(|h| h.starts_with("macbook-pro-")));
}

#[tokio::test]
async fn silent_network_times_out_into_no_match() {
    let probe = ScriptedProbe::default();
    let cfg = DetectionConfig::default()
        .with_concurrency(8)
        .with_probe_timeout(Duration::from_millis(50));
    let engine = DetectionEngine::new(cfg);

    let templates = vec![PatternTemplate::new("<name>-imac.local")];
    let result = engine
        .detect_with_strategy(&candidates(), &templates, &probe)
        .await
        .unwrap();

    assert!(!result.is_match());
    assert_eq!(result.outcomes.len(), 5);
    assert!(result.outcomes.iter().all(|r| r.outcome == ProbeOutcome::timeout()));
}

#[tokio::test]
async fn cancelling_mid_run_surfaces_as_error() {
    let probe = ScriptedProbe::default();
    let engine = DetectionEngine::new(DetectionConfig::default());
    let token = engine.cancellation_token();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    });

    let templates = vec![PatternTemplate::new("<name>-imac.local")];
    let err = engine
        .detect_with_strategy(&candidates(), &templates, &probe)
        .await
        .unwrap_err();

    assert_eq!(err, DetectError::Cancelled);
    assert_eq!(probe.seen().len(), 5);
}

#[tokio::test]
async fn repeated_runs_are_reproducible() {
    let probe = ScriptedProbe::default()
        .answer("Dee-iphone.local", QUICK, ProbeOutcome::Resolved)
        .answer("iphone.local", QUICK, ProbeOutcome::Resolved);
    let templates = candidate::parse_templates("iphone.local\n<name>-iphone.local\n");
    let engine = DetectionEngine::new(DetectionConfig::default().with_probe_timeout(Duration::from_millis(100)));

    let first = engine
        .detect_with_strategy(&candidates(), &templates, &probe)
        .await
        .unwrap();
    let second = engine
        .detect_with_strategy(&candidates(), &templates, &probe)
        .await
        .unwrap();

    assert_eq!(first.verdict, second.verdict);
    assert_eq!(first.candidate().map(|c| c.as_str()), Some("Dee"));
}

#[tokio::test]
async fn iframe_needs_gecko() {
    let form = FormInput {
        country_code: Some("US".to_string()),
        gender: Some("female".to_string()),
        patterns: "<name>s-imac.local".to_string(),
        names: "Ann".to_string(),
        detection_method: DetectionMethod::Iframe,
    };

    let chromium = DetectionEngine::new(
        DetectionConfig::default().with_environment(Environment::new(EngineFamily::Chromium)),
    );
    let err = chromium.detect_form(&form).await.unwrap_err();
    assert!(matches!(err, DetectError::CapabilityUnavailable { .. }));
}

#[tokio::test]
async fn form_without_names_is_rejected() {
    let form = FormInput {
        country_code: None,
        gender: None,
        patterns: "<name>s-imac.local".to_string(),
        names: "\n  \n".to_string(),
        detection_method: DetectionMethod::Fetch,
    };

    let engine = DetectionEngine::new(DetectionConfig::default());
    let err = engine.detect_form(&form).await.unwrap_err();
    assert_eq!(err, DetectError::Configuration(ConfigError::NoCandidates));
}
