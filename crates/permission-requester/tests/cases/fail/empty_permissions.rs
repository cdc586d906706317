// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Screen;

#[runtime_permissions]
impl Screen {
    #[requires_permission()]
    pub fn show(&self) {}
}

fn main() {
    Screen.show();
}
