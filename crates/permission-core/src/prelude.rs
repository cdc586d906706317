// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Convenient re-exports for common usage.
//!
//! # Usage
//!
//! ```rust,ignore
//! use permission_core::prelude::*;
//! ```

pub use crate::{
    Completion, Continuation, ContinuationRegistry, GrantResult, PermissionAuthority,
    REQUEST_CODE_BASE, RequestCode
};
