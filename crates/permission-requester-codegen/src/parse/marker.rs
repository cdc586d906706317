// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Method-level marker parsing.
//!
//! # Syntax
//!
//! ```rust,ignore
//! #[requires_permission("android.permission.CAMERA")]
//! #[requires_permission(manifest::CAMERA, manifest::RECORD_AUDIO)]
//! #[requires_permission("LOCATION", suffix = "_with_location")]
//! #[before_request(show_rationale)]
//! #[on_denied("explain_denial")]
//! ```
//!
//! Permissions are string literals or paths to `&'static str` constants,
//! kept in declaration order. Hooks name a `&self` method of the same type.

use proc_macro2::{Span, TokenStream};
use quote::ToTokens;
use syn::{Attribute, Ident, LitStr, Meta, Path, Token, parse::ParseStream};

use super::DEFAULT_SUFFIX;

/// One permission name as written in the marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRef {
    /// `"android.permission.CAMERA"`
    Literal(LitStr),

    /// `manifest::CAMERA`, resolved by the compiler at the emission site.
    Path(Path)
}

impl ToTokens for PermissionRef {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Self::Literal(lit) => lit.to_tokens(tokens),
            Self::Path(path) => path.to_tokens(tokens)
        }
    }
}

impl PermissionRef {
    /// Human-readable form for docs and logs.
    pub fn display(&self) -> String {
        match self {
            Self::Literal(lit) => lit.value(),
            Self::Path(path) => path
                .segments
                .iter()
                .map(|segment| segment.ident.to_string())
                .collect::<Vec<_>>()
                .join("::")
        }
    }
}

/// Parsed `#[requires_permission(...)]`.
#[derive(Debug, Clone)]
pub struct PermissionMarker {
    /// Required permissions, in declaration order. Never empty.
    pub permissions: Vec<PermissionRef>,

    /// Appended to the method name to form the entry point name.
    pub suffix: String,

    /// Span of the marker, for diagnostics.
    pub span: Span
}

/// Parse `#[requires_permission(...)]`.
///
/// # Errors
///
/// - no permissions listed
/// - unknown option or malformed permission
/// - `suffix` that does not extend an identifier
pub fn parse_permission_marker(attr: &Attribute) -> syn::Result<PermissionMarker> {
    let span = attr
        .path()
        .get_ident()
        .map_or_else(Span::call_site, Ident::span);

    let Meta::List(_) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "#[requires_permission] needs at least one permission"
        ));
    };

    let mut permissions = Vec::new();
    let mut suffix: Option<LitStr> = None;

    attr.parse_args_with(|input: ParseStream<'_>| {
        while !input.is_empty() {
            if input.peek(Ident) && input.peek2(Token![=]) {
                let key: Ident = input.parse()?;
                let _: Token![=] = input.parse()?;
                match key.to_string().as_str() {
                    "suffix" => {
                        if suffix.is_some() {
                            return Err(syn::Error::new(key.span(), "duplicate `suffix` option"));
                        }
                        suffix = Some(input.parse()?);
                    }
                    other => {
                        return Err(syn::Error::new(
                            key.span(),
                            format!("unknown option `{other}`, expected `suffix`")
                        ));
                    }
                }
            } else if input.peek(LitStr) {
                permissions.push(PermissionRef::Literal(input.parse()?));
            } else {
                permissions.push(PermissionRef::Path(input.parse()?));
            }

            if !input.is_empty() {
                let _: Token![,] = input.parse()?;
            }
        }
        Ok(())
    })?;

    if permissions.is_empty() {
        return Err(syn::Error::new_spanned(
            attr,
            "#[requires_permission] needs at least one permission"
        ));
    }

    for permission in &permissions {
        if let PermissionRef::Literal(lit) = permission
            && lit.value().is_empty()
        {
            return Err(syn::Error::new(lit.span(), "permission name cannot be empty"));
        }
    }

    let suffix = match suffix {
        Some(lit) => {
            let value = lit.value();
            if value.is_empty() || syn::parse_str::<Ident>(&format!("m{value}")).is_err() {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("suffix `{value}` does not form a valid identifier")
                ));
            }
            value
        }
        None => DEFAULT_SUFFIX.to_owned()
    };

    Ok(PermissionMarker {
        permissions,
        suffix,
        span
    })
}

/// Parse `#[before_request(hook)]` or `#[on_denied(hook)]`.
///
/// Accepts a bare identifier or a string literal naming the method.
pub fn parse_hook(attr: &Attribute) -> syn::Result<Ident> {
    let Meta::List(_) = &attr.meta else {
        return Err(syn::Error::new_spanned(attr, "expected a hook method name"));
    };

    attr.parse_args_with(|input: ParseStream<'_>| {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            syn::parse_str::<Ident>(&lit.value())
                .map(|mut ident| {
                    ident.set_span(lit.span());
                    ident
                })
                .map_err(|_| {
                    syn::Error::new(
                        lit.span(),
                        format!("`{}` is not a method name", lit.value())
                    )
                })
        } else {
            input.parse::<Ident>()
        }
    })
}
