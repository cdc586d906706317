// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use permission_requester::runtime_permissions;

pub struct Gallery;

// Companion comes from a build script; the macro only validates and strips
// the method markers.
#[runtime_permissions(emit = "build")]
impl Gallery {
    #[requires_permission("READ_MEDIA_IMAGES")]
    pub fn open(&self, index: usize) -> usize {
        index
    }
}

fn main() {
    assert_eq!(Gallery.open(3), 3);
}
