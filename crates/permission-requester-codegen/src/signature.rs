// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Parameter descriptors for annotated methods.
//!
//! Every non-receiver parameter becomes a [`ParameterDescriptor`] with a
//! positional name (`arg0`, `arg1`, ...) so the generated entry point does
//! not depend on the user's parameter patterns. Types resolve to one of two
//! shapes:
//!
//! | Written type | Resolution |
//! |--------------|------------|
//! | `i32`, `bool`, `f32`, `f64`, `i64`, `char`, `u8`, `i16` | [`TypeRef::Primitive`] |
//! | any other owned path (`String`, `std::path::PathBuf`, `Vec<u8>`) | [`TypeRef::Reference`] |
//! | `&'static str`, `&'static [u8]` | [`TypeRef::Reference`] |
//! | other borrows, `impl Trait`, `Self`, tuples, arrays, pointers, ... | [`TypeRef::Unresolved`] |
//!
//! Continuations outlive the call that created them, so every captured
//! argument must be owned and nameable outside the host `impl` block.

use quote::{ToTokens, format_ident};
use syn::{
    FnArg, GenericArgument, Ident, Path, PathArguments, ReturnType, Signature, Type, TypePath
};

/// Fixed set of primitive parameter kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// `i32`
    Integer,
    /// `bool`
    Boolean,
    /// `f32`
    Float32,
    /// `f64`
    Float64,
    /// `i64`
    Long,
    /// `char`
    Character,
    /// `u8`
    Byte,
    /// `i16`
    Short
}

impl PrimitiveKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 8] = [
        Self::Integer,
        Self::Boolean,
        Self::Float32,
        Self::Float64,
        Self::Long,
        Self::Character,
        Self::Byte,
        Self::Short
    ];

    /// Rust spelling of the kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Integer => "i32",
            Self::Boolean => "bool",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
            Self::Long => "i64",
            Self::Character => "char",
            Self::Byte => "u8",
            Self::Short => "i16"
        }
    }

    /// Kind for a type keyword, if it is one of the fixed set.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

/// Resolution of a parameter type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// One of the fixed primitive kinds.
    Primitive(PrimitiveKind),

    /// Owned nominal type. `namespace` is everything before the final `::`
    /// and is empty for bare names.
    Reference {
        /// Module path, e.g. `std::path`.
        namespace: String,
        /// Final segment identifier, e.g. `PathBuf`.
        name: String
    },

    /// Type the dispatcher cannot capture.
    Unresolved {
        /// Why the type was rejected.
        reason: &'static str
    }
}

impl TypeRef {
    /// Whether the type can be captured by a continuation.
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved { .. })
    }
}

/// One non-receiver parameter of an annotated method.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Zero-based position among non-receiver parameters.
    pub ordinal: usize,

    /// Synthesized name, `arg{ordinal}`.
    pub name: Ident,

    /// Type as written.
    pub ty: Type,

    /// Resolved shape of `ty`.
    pub kind: TypeRef
}

/// Describe every non-receiver parameter of `sig`, in order.
pub fn build(sig: &Signature) -> Vec<ParameterDescriptor> {
    sig.inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat) => Some(pat.ty.as_ref()),
            FnArg::Receiver(_) => None
        })
        .enumerate()
        .map(|(ordinal, ty)| ParameterDescriptor {
            ordinal,
            name: format_ident!("arg{}", ordinal),
            ty: ty.clone(),
            kind: classify(ty)
        })
        .collect()
}

/// Whether the method returns something other than `()`.
pub fn returns_value(sig: &Signature) -> bool {
    match &sig.output {
        ReturnType::Default => false,
        ReturnType::Type(_, ty) => !matches!(ty.as_ref(), Type::Tuple(tuple) if tuple.elems.is_empty())
    }
}

/// Resolve a parameter type.
pub fn classify(ty: &Type) -> TypeRef {
    let unresolved = |reason| TypeRef::Unresolved {
        reason
    };

    match ty {
        Type::Paren(inner) => classify(&inner.elem),
        Type::Group(inner) => classify(&inner.elem),
        Type::Path(TypePath {
            qself: None,
            path
        }) => classify_path(path),
        Type::Path(_) => unresolved("qualified `<T as Trait>` types are not supported"),
        Type::Reference(reference) => match &reference.lifetime {
            Some(lifetime) if lifetime.ident == "static" => classify_static(&reference.elem),
            _ => unresolved(
                "borrowed parameters cannot be captured by a deferred continuation; take the value by ownership"
            )
        },
        Type::ImplTrait(_) => unresolved("`impl Trait` parameters have no nameable type"),
        Type::TraitObject(_) => unresolved("unsized trait objects cannot be captured; use `Box<dyn Trait>`"),
        Type::Slice(_) => unresolved("unsized slices cannot be captured; use `Vec<T>`"),
        Type::Ptr(_) => unresolved("raw pointers cannot be captured by a `Send` continuation"),
        Type::Tuple(_) | Type::Array(_) => {
            unresolved("tuple and array parameters are not supported; wrap them in a named type")
        }
        Type::BareFn(_) => {
            unresolved("function pointer parameters are not supported; wrap them in a named type")
        }
        _ => unresolved("unsupported parameter type")
    }
}

fn classify_path(path: &Path) -> TypeRef {
    if let Some(reason) = path_violation(path) {
        return TypeRef::Unresolved {
            reason
        };
    }

    let Some(last) = path.segments.last() else {
        return TypeRef::Unresolved {
            reason: "empty type path"
        };
    };

    if path.leading_colon.is_none()
        && path.segments.len() == 1
        && last.arguments.is_none()
        && let Some(kind) = PrimitiveKind::from_keyword(&last.ident.to_string())
    {
        return TypeRef::Primitive(kind);
    }

    let mut namespace = path
        .segments
        .iter()
        .take(path.segments.len() - 1)
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        namespace.insert_str(0, "::");
    }

    TypeRef::Reference {
        namespace,
        name: last.ident.to_string()
    }
}

/// Target of a `&'static` parameter. Checked like a generic argument, so
/// `&'static str` and `&'static [u8]` both resolve.
fn classify_static(elem: &Type) -> TypeRef {
    if let Some(reason) = type_violation(elem) {
        return TypeRef::Unresolved {
            reason
        };
    }
    match elem {
        Type::Path(TypePath {
            qself: None,
            path
        }) => classify_path(path),
        other => TypeRef::Reference {
            namespace: String::new(),
            name:      other.to_token_stream().to_string()
        }
    }
}

/// First reason the path cannot be captured, looking through generic
/// arguments.
fn path_violation(path: &Path) -> Option<&'static str> {
    for segment in &path.segments {
        if segment.ident == "Self" {
            return Some("`Self` is not nameable from the dispatcher; spell out the type");
        }
        let PathArguments::AngleBracketed(args) = &segment.arguments else {
            if matches!(segment.arguments, PathArguments::Parenthesized(_)) {
                return Some("parenthesized generic arguments are not supported; wrap them in a named type");
            }
            continue;
        };
        for arg in &args.args {
            match arg {
                GenericArgument::Lifetime(lifetime) if lifetime.ident != "static" => {
                    return Some("parameters with non-'static lifetimes cannot outlive the request");
                }
                GenericArgument::Type(inner) => {
                    if let Some(reason) = type_violation(inner) {
                        return Some(reason);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

/// Like [`classify`], but for types nested in generic arguments, where
/// tuples, arrays and boxed trait objects are fine.
fn type_violation(ty: &Type) -> Option<&'static str> {
    match ty {
        Type::Paren(inner) => type_violation(&inner.elem),
        Type::Group(inner) => type_violation(&inner.elem),
        Type::Path(TypePath {
            qself: None,
            path
        }) => path_violation(path),
        Type::Reference(reference) => match &reference.lifetime {
            Some(lifetime) if lifetime.ident == "static" => type_violation(&reference.elem),
            _ => Some("borrowed generic arguments cannot outlive the request; use owned data")
        },
        Type::ImplTrait(_) => Some("`impl Trait` parameters have no nameable type"),
        Type::Tuple(tuple) => tuple.elems.iter().find_map(type_violation),
        Type::Array(array) => type_violation(&array.elem),
        Type::Slice(slice) => type_violation(&slice.elem),
        _ => None
    }
}
