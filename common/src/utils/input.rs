// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tokio_util::sync::CancellationToken;

use crate::warn;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Turns `q` or Ctrl-C into a cancellation of the running detection.
///
/// Raw mode swallows the terminal's SIGINT, so the listener has to catch
/// Ctrl-C itself. Dropping the handle stops the thread and restores the
/// terminal.
pub struct InterruptListener {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InterruptListener {
    pub fn spawn(token: CancellationToken) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = stop.clone();

        let handle = thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                warn!("Keyboard listener unavailable: {e}");
                return;
            }
            while !stop_flag.load(Ordering::Relaxed) && !token.is_cancelled() {
                if !matches!(event::poll(POLL_INTERVAL), Ok(true)) {
                    continue;
                }
                if let Ok(Event::Key(key_event)) = event::read()
                    && is_interrupt(&key_event)
                {
                    token.cancel();
                    break;
                }
            }
            let _ = disable_raw_mode();
        });

        Self {
            stop,
            handle: Some(handle),
        }
    }
}

impl Drop for InterruptListener {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let _ = disable_raw_mode();
    }
}

fn is_interrupt(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c = key_event.code == KeyCode::Char('c')
        && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
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
    fn q_and_ctrl_c_interrupt() {
        let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(is_interrupt(&q));
        assert!(is_interrupt(&ctrl_c));
    }

    #[test]
    fn plain_c_does_not_interrupt() {
        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(!is_interrupt(&c));
        assert!(!is_interrupt(&enter));
    }
}
