// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Recorder;

#[runtime_permissions]
impl Recorder {
    #[requires_permission("RECORD_AUDIO")]
    pub fn take(&mut self) {}
}

fn main() {
    Recorder.take();
}
