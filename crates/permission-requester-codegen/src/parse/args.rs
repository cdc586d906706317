// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[runtime_permissions(...)]` arguments.

use darling::{FromMeta, ast::NestedMeta};
use proc_macro2::TokenStream;
use syn::{Attribute, Meta, Visibility, parse_quote};

use super::{EmitMode, GrantPolicy};

/// Arguments of the type-level marker.
///
/// Every key is optional; unknown keys are rejected.
///
/// # Examples
///
/// ```rust,ignore
/// #[runtime_permissions]
/// #[runtime_permissions(vis = "pub(crate)", grant_policy = "skip_if_granted")]
/// #[runtime_permissions(crate = "::my_app::permissions", emit = "build")]
/// ```
#[derive(Debug, Clone, Default, FromMeta)]
pub struct TypeArgs {
    /// Path the generated code uses to reach the runtime crate.
    ///
    /// Defaults to `::permission_requester`. Override when the facade is
    /// renamed or re-exported.
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,

    /// Visibility of the companion struct and its result handler.
    ///
    /// Defaults to `pub`.
    #[darling(default)]
    pub vis: Option<CompanionVis>,

    /// Whether entry points may skip the round trip.
    #[darling(default)]
    pub grant_policy: GrantPolicy,

    /// Inline macro expansion or build-script emission.
    #[darling(default)]
    pub emit: EmitMode
}

/// Visibility given as a string (`"pub(crate)"`, `""` for private).
#[derive(Debug, Clone)]
pub struct CompanionVis(pub Visibility);

impl FromMeta for CompanionVis {
    fn from_string(value: &str) -> darling::Result<Self> {
        syn::parse_str::<Visibility>(value)
            .map(Self)
            .map_err(|_| darling::Error::unknown_value(value))
    }
}

impl TypeArgs {
    /// Parse the argument tokens of an attribute macro invocation.
    pub fn parse(tokens: TokenStream) -> darling::Result<Self> {
        if tokens.is_empty() {
            return Ok(Self::default());
        }
        let items = NestedMeta::parse_meta_list(tokens)?;
        Self::from_list(&items)
    }

    /// Parse the arguments of a marker found while scanning source.
    pub fn from_attribute(attr: &Attribute) -> darling::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            Meta::List(list) => Self::parse(list.tokens.clone()),
            Meta::NameValue(_) => Err(darling::Error::custom(
                "expected #[runtime_permissions] or #[runtime_permissions(...)]"
            )
            .with_span(attr))
        }
    }

    /// Runtime crate path used by generated code.
    pub fn krate(&self) -> syn::Path {
        self.krate
            .clone()
            .unwrap_or_else(|| parse_quote!(::permission_requester))
    }

    /// Visibility of the companion struct.
    pub fn vis(&self) -> Visibility {
        self.vis
            .as_ref()
            .map(|vis| vis.0.clone())
            .unwrap_or_else(|| parse_quote!(pub))
    }
}
