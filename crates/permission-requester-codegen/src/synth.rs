// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dispatcher synthesis.
//!
//! ```text
//! AnnotatedType
//!     │
//!     ├── validate::check_type          (structure, markers, names)
//!     ├── signature::build              (per method)
//!     ├── validate::check_parameters    (per method)
//!     │
//!     │   any error → Err, no codes consumed
//!     │
//!     ├── allocator.next()              (per method, declaration order)
//!     ▼
//! DispatcherDef
//! ```

use syn::{Ident, Path, Type};

use crate::{
    allocator::RequestCodeAllocator,
    model::{COMPANION_SUFFIX, DispatcherDef, EntryPointDef, code_const_ident},
    scan::AnnotatedType,
    signature::{self, ParameterDescriptor},
    validate::{self, Diagnostics}
};

/// Validate `ty` without allocating codes.
///
/// Used where the companion is emitted elsewhere (`emit = "build"`).
pub fn check(ty: &AnnotatedType) -> syn::Result<()> {
    validated_signatures(ty).map(drop)
}

/// Build the dispatcher for `ty`, drawing one code per method from
/// `allocator`.
///
/// # Errors
///
/// Every structural and signature problem of `ty`, combined. Codes are only
/// allocated once the type is known to be valid.
#[tracing::instrument(level = "debug", skip_all, fields(owner = %ty.qualified_name()))]
pub fn synthesize(
    ty: &AnnotatedType,
    allocator: &RequestCodeAllocator
) -> syn::Result<DispatcherDef> {
    let signatures = validated_signatures(ty)?;
    let owner = owner_path(ty)?;
    let owner_ident = owner
        .segments
        .last()
        .map(|segment| segment.ident.clone())
        .ok_or_else(|| syn::Error::new(ty.span, "the owner must be a named type"))?;

    let entry_points = ty
        .methods
        .iter()
        .zip(signatures)
        .map(|(method, params)| {
            let code = allocator.next();
            let target = method.ident().clone();
            tracing::debug!(method = %target, %code, "allocated request code");

            EntryPointDef {
                ident: method.entry_point_name(),
                code_const: code_const_ident(&target),
                vis: method.vis().clone(),
                params,
                permissions: method.marker.permissions.clone(),
                code,
                before: method.before.clone(),
                on_denied: method.on_denied.clone(),
                returns_value: signature::returns_value(&method.method.sig),
                target
            }
        })
        .collect();

    Ok(DispatcherDef {
        ident: Ident::new(&format!("{owner_ident}{COMPANION_SUFFIX}"), owner_ident.span()),
        vis: ty.args.vis(),
        owner,
        generics: ty.generics.clone(),
        qualified_name: ty.qualified_name(),
        krate: ty.args.krate(),
        policy: ty.args.grant_policy,
        entry_points
    })
}

fn validated_signatures(ty: &AnnotatedType) -> syn::Result<Vec<Vec<ParameterDescriptor>>> {
    let mut diagnostics = Diagnostics::default();
    validate::check_type(ty, &mut diagnostics);

    let signatures = ty
        .methods
        .iter()
        .map(|method| {
            let params = signature::build(&method.method.sig);
            validate::check_parameters(method, &params, &mut diagnostics);
            params
        })
        .collect();

    diagnostics.finish()?;
    Ok(signatures)
}

fn owner_path(ty: &AnnotatedType) -> syn::Result<Path> {
    match &ty.self_ty {
        Type::Path(path) if path.qself.is_none() => Ok(path.path.clone()),
        other => Err(syn::Error::new_spanned(other, "the owner must be a named type"))
    }
}
