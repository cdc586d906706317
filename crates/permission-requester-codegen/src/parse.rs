// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Marker schema.
//!
//! Four attributes drive generation:
//!
//! | Marker | Target | Arguments |
//! |--------|--------|-----------|
//! | `#[runtime_permissions]` | inherent `impl` block | [`TypeArgs`] |
//! | `#[requires_permission]` | method | permissions, `suffix = "..."` |
//! | `#[before_request]` | method | hook method name |
//! | `#[on_denied]` | method | hook method name |
//!
//! The method markers are inert: the type-level macro strips them from the
//! block it re-emits, and the build-script scanner only reads them.

mod args;
mod marker;
mod policy;

pub use args::TypeArgs;
pub use marker::{PermissionMarker, PermissionRef, parse_hook, parse_permission_marker};
pub use policy::{EmitMode, GrantPolicy};
use syn::Attribute;

/// Type-level marker name.
pub const TYPE_MARKER: &str = "runtime_permissions";

/// Method-level marker listing required permissions.
pub const PERMISSION_MARKER: &str = "requires_permission";

/// Method-level marker naming the hook run before the request.
pub const BEFORE_MARKER: &str = "before_request";

/// Method-level marker naming the hook run on denial.
pub const DENIED_MARKER: &str = "on_denied";

/// Entry point suffix used when `suffix` is not given.
pub const DEFAULT_SUFFIX: &str = "_checked";

/// Whether `attr` is one of the method-level markers.
pub fn is_method_marker(attr: &Attribute) -> bool {
    [PERMISSION_MARKER, BEFORE_MARKER, DENIED_MARKER]
        .iter()
        .any(|name| attr.path().is_ident(name))
}

/// Whether `attr` is the type-level marker, bare or path-qualified
/// (`#[permission_requester::runtime_permissions]`).
pub fn is_type_marker(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == TYPE_MARKER)
}
