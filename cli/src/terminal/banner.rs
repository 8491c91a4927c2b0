// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use colored::*;

use crate::nprint;

const LOGO: &str = r#"
    ███╗   ██╗ █████╗ ███╗   ███╗███████╗██╗     ███████╗ █████╗ ██╗  ██╗
    ████╗  ██║██╔══██╗████╗ ████║██╔════╝██║     ██╔════╝██╔══██╗██║ ██╔╝
    ██╔██╗ ██║███████║██╔████╔██║█████╗  ██║     █████╗  ███████║█████╔╝
    ██║╚██╗██║██╔══██║██║╚██╔╝██║██╔══╝  ██║     ██╔══╝  ██╔══██║██╔═██╗
    ██║ ╚████║██║  ██║██║ ╚═╝ ██║███████╗███████╗███████╗██║  ██║██║  ██╗
    ╚═╝  ╚═══╝╚═╝  ╚═╝╚═╝     ╚═╝╚══════╝╚══════╝╚══════╝╚═╝  ╚═╝╚═╝  ╚═╝"#;

pub const NO_MATCH: &str = r#"
              ┌─────────────────────────────────┐
              │   ?  ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─  ?   │
              │      nobody answered to any     │
              │        of the names tried       │
              │   ?  ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─  ?   │
              └─────────────────────────────────┘"#;

pub fn print() {
    nprint!("{}", LOGO.bright_green());
    nprint!();
}
