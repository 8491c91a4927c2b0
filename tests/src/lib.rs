// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod detection;

pub mod utils {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use nameleak_common::models::method::DetectionMethod;
    use nameleak_common::models::outcome::ProbeOutcome;
    use nameleak_common::models::target::ProbeTarget;
    use nameleak_core::ProbeStrategy;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// A loopback HTTP server answering every request with a 404.
    pub struct HttpStub {
        pub port: u16,
        handle: JoinHandle<()>,
    }

    impl HttpStub {
        pub async fn start() -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let port = listener.local_addr().unwrap().port();

            let handle = tokio::spawn(async move {
                while let Ok((mut socket, _)) = listener.accept().await {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 1024];
                        let _ = socket.read(&mut buf).await;
                        let _ = socket
                            .write_all(b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\n\r\n")
                            .await;
                    });
                }
            });

            Self { port, handle }
        }
    }

    impl Drop for HttpStub {
        fn drop(&mut self) {
            self.handle.abort();
        }
    }

    /// A loopback port nobody listens on.
    pub async fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap().port()
    }

    /// Answers from a per-hostname script; unscripted hosts never answer.
    #[derive(Default)]
    pub struct ScriptedProbe {
        script: HashMap<String, (Duration, ProbeOutcome)>,
        seen: Mutex<Vec<String>>,
    }

    impl ScriptedProbe {
        pub fn answer(mut self, host: &str, after: Duration, outcome: ProbeOutcome) -> Self {
            self.script.insert(host.to_string(), (after, outcome));
            self
        }

        /// Hostnames probed so far, in start order.
        pub fn seen(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProbeStrategy for ScriptedProbe {
        fn method(&self) -> DetectionMethod {
            DetectionMethod::WebRtc
        }

        async fn probe(&self, target: &ProbeTarget, _timeout: Duration) -> ProbeOutcome {
            self.seen.lock().unwrap().push(target.hostname().to_string());
            match self.script.get(target.hostname()) {
                Some((after, outcome)) => {
                    tokio::time::sleep(*after).await;
                    outcome.clone()
                }
                None => std::future::pending().await,
            }
        }
    }
}
