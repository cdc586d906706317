// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime protocol for permission-requester generated dispatchers.
//!
//! Generated `{Type}PermissionRequester` companions are thin: every entry
//! point registers continuations here and hands a [`RequestCode`] to the
//! host's [`PermissionAuthority`]. When the platform answers, the host
//! forwards the result and the registry resumes exactly one continuation.
//!
//! # Overview
//!
//! - [`RequestCode`]: Key correlating a request with its continuations
//! - [`GrantResult`]: Per-permission platform answer
//! - [`Completion`]: Outcome of a delivered result
//! - [`ContinuationRegistry`]: Grant/deny continuation maps behind one lock
//! - [`PermissionAuthority`]: External collaborator owning the platform
//! - [`prelude`]: Convenient re-exports
//!
//! # Protocol
//!
//! ```text
//! entry point ──register(code)──▶ registry ──▶ authority.request(code)
//!                                                   │
//! host.on_result(code, perms, results) ◀────────────┘
//!          │
//!          └──▶ registry.complete(code) ──▶ grant XOR deny (at most once)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod authority;
pub mod prelude;
mod registry;

use std::fmt;

pub use authority::PermissionAuthority;
pub use registry::{Continuation, ContinuationRegistry};

/// Reserved base for generated request codes.
///
/// Generated codes start strictly above this value so they stay clear of
/// small codes a host assigns by hand for its own requests.
pub const REQUEST_CODE_BASE: u32 = 0x999;

/// Key correlating one permission request with its pending continuations.
///
/// Codes are allocated at generation time and embedded into generated
/// dispatchers as associated constants. At runtime they are plain lookup
/// keys.
///
/// # Example
///
/// ```rust
/// use permission_core::{REQUEST_CODE_BASE, RequestCode};
///
/// let code = RequestCode::new(REQUEST_CODE_BASE + 1);
/// assert!(code.is_generated());
/// assert_eq!(code.get(), 0x99a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestCode(u32);

impl RequestCode {
    /// Wrap a raw code.
    pub const fn new(code: u32) -> Self {
        Self(code)
    }

    /// Raw integer value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether the code lies in the generated range (above
    /// [`REQUEST_CODE_BASE`]).
    pub const fn is_generated(self) -> bool {
        self.0 > REQUEST_CODE_BASE
    }
}

impl From<u32> for RequestCode {
    fn from(code: u32) -> Self {
        Self(code)
    }
}

impl fmt::Display for RequestCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Platform answer for a single permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrantResult {
    /// The permission was granted.
    Granted,

    /// The permission was denied (or the request was dismissed).
    Denied
}

impl GrantResult {
    /// Platform integer for a granted permission.
    pub const GRANTED_CODE: i32 = 0;

    /// Platform integer for a denied permission.
    pub const DENIED_CODE: i32 = -1;

    /// Convert a platform integer. Anything but [`Self::GRANTED_CODE`] is a
    /// denial.
    pub const fn from_code(code: i32) -> Self {
        if code == Self::GRANTED_CODE {
            Self::Granted
        } else {
            Self::Denied
        }
    }

    /// Convert a whole platform result array.
    ///
    /// ```rust
    /// use permission_core::GrantResult;
    ///
    /// let results = GrantResult::from_codes(&[0, -1]);
    /// assert_eq!(results, vec![GrantResult::Granted, GrantResult::Denied]);
    /// ```
    pub fn from_codes(codes: &[i32]) -> Vec<Self> {
        codes.iter().copied().map(Self::from_code).collect()
    }

    /// Platform integer for this result.
    pub const fn code(self) -> i32 {
        match self {
            Self::Granted => Self::GRANTED_CODE,
            Self::Denied => Self::DENIED_CODE
        }
    }

    /// Check if this is a grant.
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<i32> for GrantResult {
    fn from(code: i32) -> Self {
        Self::from_code(code)
    }
}

impl From<bool> for GrantResult {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Outcome of delivering a permission result to a dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// No continuation is registered for the code.
    ///
    /// Either the code belongs to an unrelated caller sharing the platform
    /// channel, or the request was already completed.
    Unknown,

    /// Every permission was granted; the grant continuation ran.
    Granted,

    /// At least one permission was not granted; the deny continuation ran if
    /// one was registered.
    Denied {
        /// Permissions whose result was not a grant, in request order.
        not_granted: Vec<String>
    }
}

impl Completion {
    /// Check if the delivery matched a pending request.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Check if the grant continuation ran.
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Check if the request resolved as denied.
    pub const fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_code_generated_range() {
        assert!(!RequestCode::new(REQUEST_CODE_BASE).is_generated());
        assert!(RequestCode::new(REQUEST_CODE_BASE + 1).is_generated());
        assert!(!RequestCode::new(42).is_generated());
    }

    #[test]
    fn request_code_display_is_hex() {
        assert_eq!(RequestCode::new(0x99a).to_string(), "0x99a");
        assert_eq!(RequestCode::from(7).get(), 7);
    }

    #[test]
    fn grant_result_from_platform_codes() {
        assert_eq!(GrantResult::from_code(0), GrantResult::Granted);
        assert_eq!(GrantResult::from_code(-1), GrantResult::Denied);
        assert_eq!(GrantResult::from_code(1), GrantResult::Denied);
        assert_eq!(GrantResult::from(true), GrantResult::Granted);
        assert_eq!(GrantResult::from(false), GrantResult::Denied);
    }

    #[test]
    fn grant_result_code_roundtrip() {
        assert_eq!(GrantResult::Granted.code(), 0);
        assert_eq!(GrantResult::Denied.code(), -1);
        assert!(GrantResult::Granted.is_granted());
        assert!(!GrantResult::Denied.is_granted());
    }

    #[test]
    fn completion_predicates() {
        assert!(!Completion::Unknown.is_known());
        assert!(Completion::Granted.is_granted());
        let denied = Completion::Denied {
            not_granted: vec!["CAMERA".to_string()]
        };
        assert!(denied.is_known());
        assert!(denied.is_denied());
        assert!(!denied.is_granted());
    }
}
