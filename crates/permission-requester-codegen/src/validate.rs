// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural checks on annotated declarations.
//!
//! Every problem is reported at the offending element and all problems of
//! one type are collected before giving up, so a single build shows the
//! full list. A type with any problem produces no dispatcher.
//!
//! # Rules
//!
//! | Element | Requirement |
//! |---------|-------------|
//! | marked item | inherent `impl` block |
//! | placement | top level; a nested block must not sit in a private module or a function body |
//! | block | type parameters only (no lifetime or const parameters), self type is a path |
//! | method | `&self` receiver, no generics, not `async`/`const`/`unsafe`/`extern` |
//! | parameters | owned, nameable types (see [`signature`](crate::signature)) |
//! | entry points | unique names that do not shadow the companion's own functions |
//! | request codes | unique `{METHOD}_REQUEST_CODE` constant names |

use std::collections::HashMap;

use syn::{GenericParam, Item, Type, spanned::Spanned};

use crate::{
    model::{RESERVED_NAMES, code_const_ident},
    parse::TYPE_MARKER,
    scan::{AnnotatedMethod, AnnotatedType, Nesting, item_ident},
    signature::{ParameterDescriptor, TypeRef}
};

/// Collects errors and combines them into one.
#[derive(Debug, Default)]
pub struct Diagnostics {
    error: Option<syn::Error>
}

impl Diagnostics {
    /// Record an error.
    pub fn push(&mut self, error: syn::Error) {
        match &mut self.error {
            Some(existing) => existing.combine(error),
            None => self.error = Some(error)
        }
    }

    /// Record a result's error, keeping its value.
    pub fn handle<T>(&mut self, result: syn::Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.push(err);
                None
            }
        }
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.error.is_none()
    }

    /// `Err` with every recorded error, or `Ok`.
    pub fn finish(self) -> syn::Result<()> {
        self.error.map_or(Ok(()), Err)
    }
}

impl Extend<syn::Error> for Diagnostics {
    fn extend<I: IntoIterator<Item = syn::Error>>(&mut self, iter: I) {
        for error in iter {
            self.push(error);
        }
    }
}

/// Error for a type-level marker on something other than an `impl` block.
pub fn misplaced_marker(item: &Item) -> syn::Error {
    let message = format!("#[{TYPE_MARKER}] only applies to inherent impl blocks");
    match item_ident(item) {
        Some(ident) => syn::Error::new(ident.span(), message),
        None => syn::Error::new(item.span(), message)
    }
}

/// Check everything that does not depend on parameter types.
pub fn check_type(ty: &AnnotatedType, diagnostics: &mut Diagnostics) {
    diagnostics.extend(ty.diagnostics.iter().cloned());

    if let Some(path) = &ty.trait_path {
        diagnostics.push(syn::Error::new_spanned(
            path,
            format!("#[{TYPE_MARKER}] only applies to inherent impl blocks, not trait implementations")
        ));
    }

    check_nesting(ty, diagnostics);

    for param in &ty.generics.params {
        match param {
            GenericParam::Type(_) => {}
            GenericParam::Lifetime(param) => diagnostics.push(syn::Error::new_spanned(
                param,
                "lifetime parameters are not supported; continuations must be 'static"
            )),
            GenericParam::Const(param) => diagnostics.push(syn::Error::new_spanned(
                param,
                "const parameters are not supported on annotated impl blocks"
            ))
        }
    }

    match &ty.self_ty {
        Type::Path(path) if path.qself.is_none() => {}
        other => diagnostics.push(syn::Error::new_spanned(other, "the owner must be a named type"))
    }

    for method in &ty.methods {
        check_method(method, diagnostics);
    }

    check_entry_point_names(ty, diagnostics);
}

fn check_nesting(ty: &AnnotatedType, diagnostics: &mut Diagnostics) {
    match &ty.nesting {
        Nesting::TopLevel => {}
        Nesting::Module {
            name,
            private
        } => {
            if *private {
                diagnostics.push(syn::Error::new(
                    ty.span,
                    format!("annotated type is nested in private module `{name}`; it must not be private")
                ));
            }
            diagnostics.push(syn::Error::new(
                ty.span,
                format!("#[{TYPE_MARKER}] only applies to top-level declarations, found one inside `mod {name}`")
            ));
        }
        Nesting::FunctionBody {
            name
        } => {
            diagnostics.push(syn::Error::new(
                ty.span,
                format!("nested declaration inside `fn {name}` must be a module-level item")
            ));
            diagnostics.push(syn::Error::new(
                ty.span,
                format!("#[{TYPE_MARKER}] only applies to top-level declarations")
            ));
        }
    }
}

fn check_method(method: &AnnotatedMethod, diagnostics: &mut Diagnostics) {
    let sig = &method.method.sig;
    let name = method.ident();

    match sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {}
        Some(receiver) => diagnostics.push(syn::Error::new_spanned(
            receiver,
            format!("`{name}` must take `&self`; the dispatcher shares the host through `Arc`")
        )),
        None => diagnostics.push(syn::Error::new(
            name.span(),
            format!("`{name}` must take `&self`; associated functions cannot be dispatched")
        ))
    }

    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        diagnostics.push(syn::Error::new_spanned(
            &sig.generics,
            format!("`{name}` cannot be generic")
        ));
    }
    if let Some(token) = &sig.asyncness {
        diagnostics.push(syn::Error::new_spanned(token, format!("`{name}` cannot be async")));
    }
    if let Some(token) = &sig.constness {
        diagnostics.push(syn::Error::new_spanned(token, format!("`{name}` cannot be const")));
    }
    if let Some(token) = &sig.unsafety {
        diagnostics.push(syn::Error::new_spanned(token, format!("`{name}` cannot be unsafe")));
    }
    if let Some(abi) = &sig.abi {
        diagnostics.push(syn::Error::new_spanned(abi, format!("`{name}` cannot declare an ABI")));
    }
    if let Some(variadic) = &sig.variadic {
        diagnostics.push(syn::Error::new_spanned(variadic, format!("`{name}` cannot be variadic")));
    }
}

fn check_entry_point_names(ty: &AnnotatedType, diagnostics: &mut Diagnostics) {
    let mut seen: HashMap<String, &AnnotatedMethod> = HashMap::new();
    let mut constants: HashMap<String, &AnnotatedMethod> = HashMap::new();

    for method in &ty.methods {
        let entry_point = method.entry_point_name().to_string();

        if RESERVED_NAMES.contains(&entry_point.as_str()) {
            diagnostics.push(syn::Error::new(
                method.marker.span,
                format!("entry point `{entry_point}` collides with a generated dispatcher function")
            ));
        }

        if let Some(previous) = seen.get(&entry_point) {
            diagnostics.push(syn::Error::new(
                method.marker.span,
                format!(
                    "entry point `{entry_point}` is already generated for `{}`; choose another suffix",
                    previous.ident()
                )
            ));
        } else {
            seen.insert(entry_point, method);
        }

        let constant = code_const_ident(method.ident()).to_string();
        if let Some(previous) = constants.get(&constant) {
            diagnostics.push(syn::Error::new(
                method.ident().span(),
                format!(
                    "request code constant `{constant}` is already generated for `{}`; rename one of the methods",
                    previous.ident()
                )
            ));
        } else {
            constants.insert(constant, method);
        }
    }
}

/// Check that every parameter resolved to a capturable type.
pub fn check_parameters(
    method: &AnnotatedMethod,
    params: &[ParameterDescriptor],
    diagnostics: &mut Diagnostics
) {
    for param in params {
        if let TypeRef::Unresolved {
            reason
        } = &param.kind
        {
            diagnostics.push(syn::Error::new_spanned(
                &param.ty,
                format!(
                    "cannot resolve type of parameter {} of `{}`: {reason}",
                    param.ordinal,
                    method.ident()
                )
            ));
        }
    }
}

#[cfg(test)]
mod tests;
