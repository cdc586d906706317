// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Request code allocation.
//!
//! Codes are assigned at generation time and embedded in the generated
//! source as constants. One allocator is shared by every type processed in
//! the same generator process, so codes are unique across all dispatchers
//! the process emits:
//!
//! ```text
//! REQUEST_CODE_BASE = 0x999
//!
//! first method   → 0x99A
//! second method  → 0x99B
//! ...
//! ```
//!
//! Codes from separate processes (the attribute macro and a build script,
//! or two crates) are not coordinated.

use std::sync::atomic::{AtomicU32, Ordering};

use permission_core::{REQUEST_CODE_BASE, RequestCode};

static GLOBAL: RequestCodeAllocator = RequestCodeAllocator::starting_at(REQUEST_CODE_BASE);

/// The process-wide allocator.
pub fn global() -> &'static RequestCodeAllocator {
    &GLOBAL
}

/// Monotonic request code counter.
#[derive(Debug)]
pub struct RequestCodeAllocator {
    last: AtomicU32
}

impl RequestCodeAllocator {
    /// Allocator whose first code is `base + 1`.
    pub const fn starting_at(base: u32) -> Self {
        Self {
            last: AtomicU32::new(base)
        }
    }

    /// Next unused code.
    pub fn next(&self) -> RequestCode {
        RequestCode::new(self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1))
    }

    /// Most recently allocated code, or the base if none was allocated.
    pub fn last(&self) -> RequestCode {
        RequestCode::new(self.last.load(Ordering::Relaxed))
    }
}

impl Default for RequestCodeAllocator {
    fn default() -> Self {
        Self::starting_at(REQUEST_CODE_BASE)
    }
}
