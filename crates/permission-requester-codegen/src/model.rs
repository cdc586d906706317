// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Intermediate representation of a companion dispatcher.
//!
//! [`synthesize`](crate::synthesize) builds a [`DispatcherDef`] from a
//! validated annotated type; [`render`](crate::render::render) turns it into
//! tokens. Keeping the two apart lets tests inspect codes, names and capture
//! lists without parsing generated source.
//!
//! ```text
//! DispatcherDef (MainActivityPermissionRequester)
//! ├── owner: MainActivity
//! ├── policy: RoundTrip
//! └── entry_points
//!     ├── EntryPointDef do_something_checked → do_something, code 0x99A
//!     └── EntryPointDef open_camera_checked  → open_camera,  code 0x99B
//! ```

use convert_case::{Case, Casing};
use permission_core::RequestCode;
use syn::{Generics, Ident, Path, Visibility};

use crate::{
    parse::{GrantPolicy, PermissionRef},
    signature::ParameterDescriptor
};

/// Appended to the owner name to form the companion name.
pub const COMPANION_SUFFIX: &str = "PermissionRequester";

/// Associated function receiving platform results.
pub const RESULT_HANDLER: &str = "on_request_permissions_result";

/// Associated function names the companion defines itself.
pub const RESERVED_NAMES: [&str; 4] = [
    RESULT_HANDLER,
    "pending_requests",
    "is_pending",
    "continuations"
];

/// Companion dispatcher for one annotated type.
#[derive(Debug, Clone)]
pub struct DispatcherDef {
    /// Companion struct name, `{Owner}PermissionRequester`.
    pub ident: Ident,

    /// Companion visibility.
    pub vis: Visibility,

    /// Path to the owner type as written in the `impl` header.
    pub owner: Path,

    /// Type parameters of the `impl` block, repeated on the companion.
    pub generics: Generics,

    /// Owner name qualified by its module path, e.g. `app::MainActivity`.
    pub qualified_name: String,

    /// Runtime crate path.
    pub krate: Path,

    /// Whether entry points may skip the round trip.
    pub policy: GrantPolicy,

    /// One per `#[requires_permission]` method, in declaration order.
    pub entry_points: Vec<EntryPointDef>
}

impl DispatcherDef {
    /// Request codes of all entry points, in declaration order.
    pub fn codes(&self) -> Vec<RequestCode> {
        self.entry_points.iter().map(|ep| ep.code).collect()
    }

    /// Entry point by generated name.
    pub fn entry_point(&self, name: &str) -> Option<&EntryPointDef> {
        self.entry_points.iter().find(|ep| ep.ident == name)
    }

    /// Owner name without module path.
    pub fn owner_name(&self) -> String {
        self.owner
            .segments
            .last()
            .map(|segment| segment.ident.to_string())
            .unwrap_or_default()
    }
}

/// Generated entry point wrapping one annotated method.
#[derive(Debug, Clone)]
pub struct EntryPointDef {
    /// `{method}{suffix}`.
    pub ident: Ident,

    /// The annotated method.
    pub target: Ident,

    /// Visibility copied from the annotated method.
    pub vis: Visibility,

    /// Parameters forwarded to the method, in order.
    pub params: Vec<ParameterDescriptor>,

    /// Required permissions, in declaration order.
    pub permissions: Vec<PermissionRef>,

    /// Code embedded for this method.
    pub code: RequestCode,

    /// Associated constant holding `code`, `{METHOD}_REQUEST_CODE`.
    pub code_const: Ident,

    /// Hook run on the host before requesting.
    pub before: Option<Ident>,

    /// Hook run on the host when any permission is denied.
    pub on_denied: Option<Ident>,

    /// Whether the method returns a value the continuation must discard.
    pub returns_value: bool
}

/// `do_something` → `DO_SOMETHING_REQUEST_CODE`.
///
/// `fooBar` and `foo_bar` share a name; the validator rejects the pair.
pub fn code_const_ident(method: &Ident) -> Ident {
    let name = method.to_string();
    let snake = name.trim_start_matches("r#").to_case(Case::Snake);
    Ident::new(&format!("{}_REQUEST_CODE", snake.to_uppercase()), method.span())
}

impl EntryPointDef {
    /// Permission names for docs and logs.
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions.iter().map(PermissionRef::display).collect()
    }
}
