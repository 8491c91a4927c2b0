// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Just enough HTTP/1.1 to request a document and peek at the status line.

/// A top-level document request, like the one an iframe navigation sends.
pub fn document_request(host: &str) -> Vec<u8> {
    format!(
        "GET / HTTP/1.1\r\n\
         Host: {host}\r\n\
         Accept: text/html\r\n\
         Connection: close\r\n\
         \r\n"
    )
    .into_bytes()
}

/// Status code of a response head, if the bytes start with one.
pub fn status_code(response: &[u8]) -> Option<u16> {
    let line_end = response
        .windows(2)
        .position(|w| w == b"\r\n")
        .unwrap_or(response.len());
    let line = std::str::from_utf8(&response[..line_end]).ok()?;

    let mut parts = line.split_whitespace();
    let version = parts.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    parts.next()?.parse().ok()
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
    fn request_names_the_host() {
        let request = String::from_utf8(document_request("anns-imac.local")).unwrap();
        assert!(request.starts_with("GET / HTTP/1.1\r\n"));
        assert!(request.contains("Host: anns-imac.local\r\n"));
        assert!(request.ends_with("\r\n\r\n"));
    }

    #[test]
    fn status_code_is_parsed() {
        assert_eq!(status_code(b"HTTP/1.1 404 Not Found\r\nServer: x\r\n"), Some(404));
        assert_eq!(status_code(b"HTTP/1.0 200"), Some(200));
    }

    #[test]
    fn non_http_bytes_have_no_status() {
        assert_eq!(status_code(b"SSH-2.0-OpenSSH_9.6\r\n"), None);
        assert_eq!(status_code(b""), None);
    }
}
