// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type-level switches: grant policy and emission mode.

use darling::FromMeta;

/// What a generated entry point does when every permission is already held.
///
/// | Policy | Behaviour |
/// |--------|-----------|
/// | `RoundTrip` | Always registers continuations and asks the authority |
/// | `SkipIfGranted` | Calls the method directly when `all_granted` holds |
///
/// `RoundTrip` is the default: the authority alone decides whether a request
/// is shown, and the method always runs from the completion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GrantPolicy {
    /// Always go through the request/completion round trip.
    #[default]
    RoundTrip,

    /// Short-circuit when the authority reports everything granted.
    SkipIfGranted
}

impl FromMeta for GrantPolicy {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "round_trip" => Ok(Self::RoundTrip),
            "skip_if_granted" => Ok(Self::SkipIfGranted),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

/// Where the companion dispatcher is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitMode {
    /// The attribute macro emits the companion next to the `impl` block.
    #[default]
    Inline,

    /// The attribute macro only validates and strips markers; a build script
    /// writes the companion into `OUT_DIR`.
    Build
}

impl FromMeta for EmitMode {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "inline" => Ok(Self::Inline),
            "build" => Ok(Self::Build),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}
