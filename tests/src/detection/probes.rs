// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use std::time::Duration;

use nameleak_common::config::DetectionConfig;
use nameleak_common::models::candidate::{CandidateName, PatternTemplate};
use nameleak_common::models::method::{EngineFamily, Environment};
use nameleak_common::models::outcome::{InconclusiveReason, ProbeOutcome};
use nameleak_common::models::target::ProbeTarget;
use nameleak_core::strategy::{FetchProbe, IframeProbe};
use nameleak_core::{DetectionEngine, ProbeStrategy};

use crate::utils::{HttpStub, closed_port};

const HINT: Duration = Duration::from_secs(2);

fn gecko() -> Environment {
    Environment::new(EngineFamily::Gecko)
}

#[tokio::test]
async fn fetch_resolves_listening_localhost() {
    let stub = HttpStub::start().await;
    let outcome = FetchProbe::with_port(stub.port)
        .probe(&ProbeTarget::device_only("localhost"), HINT)
        .await;
    assert_eq!(outcome, ProbeOutcome::Resolved);
}

#[tokio::test]
async fn fetch_treats_refusal_as_resolution() {
    let port = closed_port().await;
    let outcome = FetchProbe::with_port(port)
        .probe(&ProbeTarget::device_only("127.0.0.1"), HINT)
        .await;
    assert_eq!(outcome, ProbeOutcome::Resolved);
}

#[tokio::test]
async fn fetch_reports_invalid_names_unresolved() {
    let outcome = FetchProbe::new()
        .probe(&ProbeTarget::device_only("anns-imac.invalid"), HINT)
        .await;
    assert_eq!(outcome, ProbeOutcome::NotResolved);
}

#[tokio::test]
async fn iframe_resolves_on_http_error_page() {
    let stub = HttpStub::start().await;
    let outcome = IframeProbe::new(gecko())
        .with_port(stub.port)
        .probe(&ProbeTarget::device_only("localhost"), HINT)
        .await;
    assert_eq!(outcome, ProbeOutcome::Resolved);
}

#[tokio::test]
async fn iframe_treats_refusal_as_resolution() {
    let port = closed_port().await;
    let outcome = IframeProbe::new(gecko())
        .with_port(port)
        .probe(&ProbeTarget::device_only("127.0.0.1"), HINT)
        .await;
    assert_eq!(outcome, ProbeOutcome::Resolved);
}

#[tokio::test]
async fn iframe_fails_fast_outside_gecko() {
    let outcome = IframeProbe::new(Environment::new(EngineFamily::WebKit))
        .probe(&ProbeTarget::device_only("localhost"), HINT)
        .await;
    assert!(matches!(
        outcome,
        ProbeOutcome::Inconclusive(InconclusiveReason::Unsupported(_))
    ));
}

#[tokio::test]
async fn engine_finds_the_name_that_resolves() {
    let stub = HttpStub::start().await;
    let engine = DetectionEngine::new(DetectionConfig::default().with_concurrency(1));

    let candidates = vec![
        CandidateName::from("nobody-here.invalid"),
        CandidateName::from("localhost"),
    ];
    let templates = vec![PatternTemplate::new("<name>")];

    let result = engine
        .detect_with_strategy(&candidates, &templates, &FetchProbe::with_port(stub.port))
        .await
        .unwrap();

    assert_eq!(result.candidate().map(|c| c.as_str()), Some("localhost"));
    assert_eq!(result.probes_started, 2);
    assert_eq!(result.outcomes[0].outcome, ProbeOutcome::NotResolved);
}
