// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Permission authority collaborator.

use crate::RequestCode;

/// The platform side of the protocol.
///
/// Implemented by the host type that owns `#[requires_permission]` methods.
/// Generated entry points call [`request_permissions`] after registering
/// their continuations; the implementation later delivers the platform's
/// answer to the generated `on_request_permissions_result`.
///
/// The implementation decides the grant UX. It may answer synchronously from
/// inside [`request_permissions`] (for example when everything is already
/// granted); the registry is never locked while this is called.
///
/// # Example
///
/// ```rust
/// use permission_core::{PermissionAuthority, RequestCode};
///
/// struct Screen;
///
/// impl PermissionAuthority for Screen {
///     fn check_granted(&self, permission: &str) -> bool {
///         permission == "INTERNET"
///     }
///
///     fn request_permissions(&self, permissions: &[&'static str], code: RequestCode) {
///         // hand over to the platform dialog
///         let _ = (permissions, code);
///     }
/// }
/// ```
///
/// [`request_permissions`]: PermissionAuthority::request_permissions
pub trait PermissionAuthority {
    /// Whether `permission` is currently granted to the host.
    fn check_granted(&self, permission: &str) -> bool;

    /// Start a platform request. Fire-and-forget: the answer arrives later
    /// through the completion channel, keyed by `code`.
    fn request_permissions(&self, permissions: &[&'static str], code: RequestCode);

    /// Whether every permission in `permissions` is already granted.
    ///
    /// Used by dispatchers generated with `grant_policy = "skip_if_granted"`.
    /// An empty list counts as granted.
    fn all_granted(&self, permissions: &[&str]) -> bool {
        permissions
            .iter()
            .all(|permission| self.check_granted(permission))
    }
}
