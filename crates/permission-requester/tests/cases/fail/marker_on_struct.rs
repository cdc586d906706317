// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

#[runtime_permissions]
pub struct Camera;

fn main() {
    let _ = Camera;
}
