// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Screen;

#[runtime_permissions]
impl Screen {
    #[requires_permission("A")]
    pub fn open_checked(&self) {}

    #[requires_permission("A", suffix = "_checked_checked")]
    pub fn open(&self) {}
}

fn main() {
    Screen.open_checked();
    Screen.open();
}
