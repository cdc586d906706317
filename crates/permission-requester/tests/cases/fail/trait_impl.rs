// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Camera;

#[runtime_permissions]
impl Default for Camera {
    fn default() -> Self {
        Camera
    }
}

fn main() {
    let _ = Camera::default();
}
