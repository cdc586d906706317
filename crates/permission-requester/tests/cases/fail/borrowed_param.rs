// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Screen;

#[runtime_permissions]
impl Screen {
    #[requires_permission("SYSTEM_ALERT_WINDOW")]
    pub fn show(&self, title: &str) { let _ = title; }
}

fn main() {
    Screen.show("hello");
}
