// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Detection Methods & Capabilities
//!
//! [`DetectionMethod`] picks the side channel used for every target of a run.
//! Which methods make sense depends on the engine family of the environment
//! the probe pretends to run in; the [`Environment`] answers that question.
//!
//! Availability is surfaced here as plain data. The engine checks it once
//! before a run and refuses to swap methods behind the caller's back.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetectionMethod {
    Fetch,
    WebRtc,
    Iframe,
}

impl DetectionMethod {
    pub const ALL: [DetectionMethod; 3] = [Self::Fetch, Self::WebRtc, Self::Iframe];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetch => "fetch",
            Self::WebRtc => "webrtc",
            Self::Iframe => "iframe",
        }
    }

    /// Fetch on Chromium and WebKit, WebRTC on Chromium, iframe on Gecko.
    pub fn is_available_on(&self, engine: EngineFamily) -> bool {
        match self {
            Self::Fetch => matches!(engine, EngineFamily::Chromium | EngineFamily::WebKit),
            Self::WebRtc => engine == EngineFamily::Chromium,
            Self::Iframe => engine == EngineFamily::Gecko,
        }
    }

    /// The method the form preselects for a given environment.
    pub fn default_for(environment: &Environment) -> Self {
        if environment.is_engine(EngineFamily::Gecko) {
            Self::Iframe
        } else {
            Self::Fetch
        }
    }
}

impl fmt::Display for DetectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fetch" => Ok(Self::Fetch),
            "webrtc" => Ok(Self::WebRtc),
            "iframe" => Ok(Self::Iframe),
            other => Err(ConfigError::UnknownMethod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineFamily {
    Gecko,
    #[default]
    Chromium,
    WebKit,
}

impl EngineFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gecko => "gecko",
            Self::Chromium => "chromium",
            Self::WebKit => "webkit",
        }
    }
}

impl fmt::Display for EngineFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineFamily {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gecko" | "firefox" => Ok(Self::Gecko),
            "chromium" | "blink" | "chrome" => Ok(Self::Chromium),
            "webkit" | "safari" => Ok(Self::WebKit),
            other => Err(ConfigError::UnknownEngine(other.to_string())),
        }
    }
}

/// Capability collaborator. Answers "is engine family X" for the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Environment {
    engine: EngineFamily,
}

impl Environment {
    pub fn new(engine: EngineFamily) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> EngineFamily {
        self.engine
    }

    pub fn is_engine(&self, family: EngineFamily) -> bool {
        self.engine == family
    }

    pub fn supports(&self, method: DetectionMethod) -> bool {
        method.is_available_on(self.engine)
    }

    pub fn available_methods(&self) -> Vec<DetectionMethod> {
        DetectionMethod::ALL
            .into_iter()
            .filter(|method| self.supports(*method))
            .collect()
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
