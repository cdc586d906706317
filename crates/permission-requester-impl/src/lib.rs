// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro entry point for `permission-requester`.
//!
//! This crate only adapts `proc_macro` tokens to the
//! `permission-requester-codegen` library, which owns scanning, validation,
//! code allocation and rendering. Depend on `permission-requester` instead.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

use proc_macro::TokenStream;

/// Generate a `{Type}PermissionRequester` companion for an inherent `impl`
/// block.
///
/// Every method marked `#[requires_permission(...)]` gets a
/// `{method}_checked` entry point on the companion that registers
/// continuations, asks the host's `PermissionAuthority` for the listed
/// permissions and resumes the method once the platform grants them.
///
/// # Type options
///
/// | Option | Default | Description |
/// |--------|---------|-------------|
/// | `crate` | `::permission_requester` | Path of the runtime crate |
/// | `vis` | `"pub"` | Companion visibility, e.g. `"pub(crate)"`; `""` is private |
/// | `grant_policy` | `"round_trip"` | `"skip_if_granted"` calls directly when already granted |
/// | `emit` | `"inline"` | `"build"` leaves generation to a build script |
///
/// # Method markers
///
/// | Marker | Meaning |
/// |--------|---------|
/// | `#[requires_permission("A", PATH, suffix = "_x")]` | Permissions, optional entry point suffix |
/// | `#[before_request(hook)]` | `&self` method run before the request |
/// | `#[on_denied(hook)]` | `&self` method run when any permission is denied |
///
/// # Example
///
/// ```rust,ignore
/// use permission_requester::{PermissionAuthority, RequestCode, runtime_permissions};
///
/// #[runtime_permissions]
/// impl MainActivity {
///     #[requires_permission("WRITE_STORAGE", "READ_CONTACTS")]
///     #[before_request(pre)]
///     #[on_denied(on_deny)]
///     fn do_something(&self, label: String, count: i32) { /* ... */ }
///
///     fn pre(&self) {}
///     fn on_deny(&self) {}
/// }
///
/// MainActivityPermissionRequester::do_something_checked("hello".into(), 7, &activity);
/// ```
///
/// Invalid input keeps the `impl` block (markers stripped) and adds one
/// `compile_error!` per problem, so every issue is reported in one pass.
#[proc_macro_attribute]
pub fn runtime_permissions(args: TokenStream, item: TokenStream) -> TokenStream {
    permission_requester_codegen::expand(args.into(), item.into()).into()
}
