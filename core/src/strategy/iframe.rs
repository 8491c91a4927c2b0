// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use nameleak_common::models::method::{DetectionMethod, EngineFamily, Environment};
use nameleak_common::models::outcome::ProbeOutcome;
use nameleak_common::models::target::ProbeTarget;
use nameleak_common::probe;
use nameleak_protocols::http;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::ProbeStrategy;
use super::resolve::{self, Lookup, Resolver};

/// The port an `http://` document load connects to.
pub const IFRAME_PORT: u16 = 80;

const RESPONSE_PEEK: usize = 512;

/// Loads the hostname as a document and watches whether the load settles.
///
/// Gecko fires a load event for a navigation that reached a host, error page
/// or not, and stays silent when the name never resolved. Other engines fire
/// in both cases, so this probe refuses to run anywhere but Gecko.
#[derive(Clone)]
pub struct IframeProbe {
    environment: Environment,
    port: u16,
    resolver: Resolver,
}

impl IframeProbe {
    pub fn new(environment: Environment) -> Self {
        Self {
            environment,
            port: IFRAME_PORT,
            resolver: Resolver::new(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    async fn load(&self, hostname: &str, timeout: Duration) -> ProbeOutcome {
        let addrs: Vec<SocketAddr> = match self.resolver.lookup(hostname, self.port, timeout).await {
            Lookup::Found(addrs) => addrs,
            Lookup::Missing => return ProbeOutcome::NotResolved,
            Lookup::Failed(outcome) => return outcome,
        };

        let mut stream: TcpStream = match TcpStream::connect(addrs.as_slice()).await {
            Ok(stream) => stream,
            Err(e) => return resolve::classify_error(&e),
        };

        if let Err(e) = stream.write_all(&http::document_request(hostname)).await {
            return resolve::classify_error(&e);
        }

        let mut head = [0u8; RESPONSE_PEEK];
        match stream.read(&mut head).await {
            Ok(n) => {
                match http::status_code(&head[..n]) {
                    Some(code) => probe!("{hostname} answered HTTP {code}"),
                    None if n == 0 => probe!("{hostname} closed without a response"),
                    None => probe!("{hostname} answered with {n} non-HTTP bytes"),
                }
                ProbeOutcome::Resolved
            }
            Err(e) => resolve::classify_error(&e),
        }
    }
}

#[async_trait]
impl ProbeStrategy for IframeProbe {
    fn method(&self) -> DetectionMethod {
        DetectionMethod::Iframe
    }

    async fn probe(&self, target: &ProbeTarget, timeout: Duration) -> ProbeOutcome {
        if !self.environment.is_engine(EngineFamily::Gecko) {
            return ProbeOutcome::unsupported(format!(
                "document load events are not observable on {}",
                self.environment.engine()
            ));
        }
        self.load(target.hostname(), timeout).await
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
    use nameleak_common::models::outcome::InconclusiveReason;
    use tokio::net::TcpListener;

    const HINT: Duration = Duration::from_secs(2);

    fn gecko() -> Environment {
        Environment::new(EngineFamily::Gecko)
    }

    #[tokio::test]
    async fn http_response_resolves() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 256];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(b"HTTP/1.1 404 Not Found\r\n\r\n").await;
        });

        let probe = IframeProbe::new(gecko()).with_port(port);
        let outcome = probe.probe(&ProbeTarget::device_only("127.0.0.1"), HINT).await;
        assert_eq!(outcome, ProbeOutcome::Resolved);
    }

    #[tokio::test]
    async fn unknown_name_does_not_resolve() {
        let probe = IframeProbe::new(gecko());
        let outcome = probe
            .probe(&ProbeTarget::device_only("nobody-here.invalid"), HINT)
            .await;
        assert_eq!(outcome, ProbeOutcome::NotResolved);
    }

    #[tokio::test]
    async fn other_engines_are_unsupported() {
        let probe = IframeProbe::new(Environment::new(EngineFamily::Chromium));
        let outcome = probe.probe(&ProbeTarget::device_only("localhost"), HINT).await;
        assert!(matches!(
            outcome,
            ProbeOutcome::Inconclusive(InconclusiveReason::Unsupported(_))
        ));
    }
}
