// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration scanner.
//!
//! Finds blocks carrying `#[runtime_permissions]` and, inside them, methods
//! carrying `#[requires_permission]` plus their hook markers. The scanner
//! records where each block sits (top level, inside a module, inside a
//! function body) and any marker it could not parse; judging the result is
//! left to [`validate`](crate::validate).
//!
//! ```text
//! syn::File ── scan_file ──► Vec<Scanned>
//!                               ├── Scanned::Type(AnnotatedType)
//!                               │     └── methods: Vec<AnnotatedMethod>
//!                               └── Scanned::Misplaced { name, error }
//!
//! syn::ItemImpl ── scan_impl ──► AnnotatedType   (attribute macro path)
//! ```

use proc_macro2::Span;
use syn::{
    Attribute, File, Ident, ImplItem, ImplItemFn, Item, ItemImpl, Path, Stmt, Type, Visibility,
    spanned::Spanned
};

use crate::{
    parse::{
        BEFORE_MARKER, DENIED_MARKER, PERMISSION_MARKER, PermissionMarker, TypeArgs,
        is_method_marker, is_type_marker, parse_hook, parse_permission_marker
    },
    validate
};

/// Where an annotated block was declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nesting {
    /// Directly in the scanned file or the macro call site.
    TopLevel,

    /// Inside an inline `mod`.
    Module {
        /// Innermost module name.
        name: Ident,
        /// Whether that module is private.
        private: bool
    },

    /// Inside a function body.
    FunctionBody {
        /// Enclosing function name.
        name: Ident
    }
}

/// An `impl` block carrying the type-level marker.
#[derive(Debug, Clone)]
pub struct AnnotatedType {
    /// Marker arguments (defaults when they failed to parse).
    pub args: TypeArgs,

    /// Self type as written.
    pub self_ty: Type,

    /// Trait path for `impl Trait for Type` blocks.
    pub trait_path: Option<Path>,

    /// Generics declared on the block.
    pub generics: syn::Generics,

    /// Module path of the declaration, outermost first.
    pub module_path: Vec<String>,

    /// Declaration nesting.
    pub nesting: Nesting,

    /// Methods carrying `#[requires_permission]`.
    pub methods: Vec<AnnotatedMethod>,

    /// Marker problems found while scanning.
    pub diagnostics: Vec<syn::Error>,

    /// Span of the block header, for block-level diagnostics.
    pub span: Span
}

impl AnnotatedType {
    /// Last identifier of the self type, when it is a plain path.
    pub fn owner_ident(&self) -> Option<&Ident> {
        match &self.self_ty {
            Type::Path(path) if path.qself.is_none() => {
                path.path.segments.last().map(|segment| &segment.ident)
            }
            _ => None
        }
    }

    /// Owner name qualified by module path, e.g. `app::MainActivity`.
    pub fn qualified_name(&self) -> String {
        let owner = self
            .owner_ident()
            .map_or_else(|| "<unnamed>".to_owned(), ToString::to_string);
        self.module_path
            .iter()
            .cloned()
            .chain(std::iter::once(owner))
            .collect::<Vec<_>>()
            .join("::")
    }
}

/// A method carrying `#[requires_permission]`.
#[derive(Debug, Clone)]
pub struct AnnotatedMethod {
    /// Method as declared (markers included).
    pub method: ImplItemFn,

    /// Parsed permission marker.
    pub marker: PermissionMarker,

    /// `#[before_request]` hook.
    pub before: Option<Ident>,

    /// `#[on_denied]` hook.
    pub on_denied: Option<Ident>
}

impl AnnotatedMethod {
    /// Method name.
    pub fn ident(&self) -> &Ident {
        &self.method.sig.ident
    }

    /// Method visibility.
    pub fn vis(&self) -> &Visibility {
        &self.method.vis
    }

    /// Name of the generated entry point.
    pub fn entry_point_name(&self) -> Ident {
        let name = self.ident().to_string();
        Ident::new(
            &format!("{}{}", name.trim_start_matches("r#"), self.marker.suffix),
            self.ident().span()
        )
    }
}

/// Result of scanning one marked item.
#[derive(Debug, Clone)]
pub enum Scanned {
    /// A marked `impl` block.
    Type(AnnotatedType),

    /// The marker sits on something other than an `impl` block.
    Misplaced {
        /// Item name, for reporting.
        name: String,
        /// Located diagnostic.
        error: syn::Error
    }
}

/// Scan a parsed file. `module_path` is the module the file is mounted at.
pub fn scan_file(file: &File, module_path: &[String]) -> Vec<Scanned> {
    let mut found = Vec::new();
    walk(&file.items, &Nesting::TopLevel, &mut module_path.to_vec(), &mut found);
    found
}

fn walk(items: &[Item], nesting: &Nesting, path: &mut Vec<String>, found: &mut Vec<Scanned>) {
    for item in items {
        let marker = item_attrs(item).iter().find(|attr| is_type_marker(attr));

        match (item, marker) {
            (Item::Impl(block), Some(attr)) => {
                let (args, error) = match TypeArgs::from_attribute(attr) {
                    Ok(args) => (args, None),
                    Err(err) => (TypeArgs::default(), Some(syn::Error::new_spanned(attr, err)))
                };
                let mut annotated = scan_impl(args, block, nesting.clone(), path);
                annotated.diagnostics.extend(error);
                found.push(Scanned::Type(annotated));
            }
            (_, Some(_)) => found.push(Scanned::Misplaced {
                name:  item_name(item),
                error: validate::misplaced_marker(item)
            }),
            (Item::Mod(module), None) => {
                if let Some((_, content)) = &module.content {
                    let inner = match nesting {
                        Nesting::FunctionBody { .. } => nesting.clone(),
                        _ => Nesting::Module {
                            name:    module.ident.clone(),
                            private: matches!(module.vis, Visibility::Inherited)
                        }
                    };
                    path.push(module.ident.to_string());
                    walk(content, &inner, path, found);
                    path.pop();
                }
            }
            (Item::Fn(function), None) => {
                let items: Vec<Item> = function
                    .block
                    .stmts
                    .iter()
                    .filter_map(|stmt| match stmt {
                        Stmt::Item(item) => Some(item.clone()),
                        _ => None
                    })
                    .collect();
                let inner = Nesting::FunctionBody {
                    name: function.sig.ident.clone()
                };
                walk(&items, &inner, path, found);
            }
            _ => {}
        }
    }
}

/// Scan one marked `impl` block.
pub fn scan_impl(
    args: TypeArgs,
    block: &ItemImpl,
    nesting: Nesting,
    module_path: &[String]
) -> AnnotatedType {
    let mut diagnostics = Vec::new();
    let methods = block
        .items
        .iter()
        .filter_map(|item| match item {
            ImplItem::Fn(method) => scan_method(method, &mut diagnostics),
            _ => None
        })
        .collect();

    AnnotatedType {
        args,
        self_ty: (*block.self_ty).clone(),
        trait_path: block.trait_.as_ref().map(|(_, path, _)| path.clone()),
        generics: block.generics.clone(),
        module_path: module_path.to_vec(),
        nesting,
        methods,
        diagnostics,
        span: block.self_ty.span()
    }
}

fn scan_method(method: &ImplItemFn, diagnostics: &mut Vec<syn::Error>) -> Option<AnnotatedMethod> {
    let permission = single(&method.attrs, PERMISSION_MARKER, diagnostics);
    let before = single(&method.attrs, BEFORE_MARKER, diagnostics);
    let denied = single(&method.attrs, DENIED_MARKER, diagnostics);

    let Some(permission) = permission else {
        for hook in [before, denied].into_iter().flatten() {
            diagnostics.push(syn::Error::new_spanned(
                hook,
                format!(
                    "#[{}] is only valid on a method with #[{PERMISSION_MARKER}]",
                    hook.path().get_ident().map_or_else(String::new, ToString::to_string)
                )
            ));
        }
        return None;
    };

    let marker = match parse_permission_marker(permission) {
        Ok(marker) => marker,
        Err(err) => {
            diagnostics.push(err);
            return None;
        }
    };

    let mut hook = |attr: Option<&Attribute>| {
        attr.and_then(|attr| match parse_hook(attr) {
            Ok(ident) => Some(ident),
            Err(err) => {
                diagnostics.push(err);
                None
            }
        })
    };
    let before = hook(before);
    let on_denied = hook(denied);

    Some(AnnotatedMethod {
        method: method.clone(),
        marker,
        before,
        on_denied
    })
}

/// The only attribute named `name`, reporting repeats.
fn single<'a>(
    attrs: &'a [Attribute],
    name: &str,
    diagnostics: &mut Vec<syn::Error>
) -> Option<&'a Attribute> {
    let mut matching = attrs.iter().filter(|attr| attr.path().is_ident(name));
    let first = matching.next();
    for repeat in matching {
        diagnostics.push(syn::Error::new_spanned(repeat, format!("duplicate #[{name}] marker")));
    }
    first
}

/// Remove method-level markers so the re-emitted block compiles.
pub fn strip_markers(block: &mut ItemImpl) {
    for item in &mut block.items {
        if let ImplItem::Fn(method) = item {
            method.attrs.retain(|attr| !is_method_marker(attr));
        }
    }
}

/// Attributes of any item kind.
pub(crate) fn item_attrs(item: &Item) -> &[Attribute] {
    match item {
        Item::Const(item) => &item.attrs,
        Item::Enum(item) => &item.attrs,
        Item::ExternCrate(item) => &item.attrs,
        Item::Fn(item) => &item.attrs,
        Item::ForeignMod(item) => &item.attrs,
        Item::Impl(item) => &item.attrs,
        Item::Macro(item) => &item.attrs,
        Item::Mod(item) => &item.attrs,
        Item::Static(item) => &item.attrs,
        Item::Struct(item) => &item.attrs,
        Item::Trait(item) => &item.attrs,
        Item::TraitAlias(item) => &item.attrs,
        Item::Type(item) => &item.attrs,
        Item::Union(item) => &item.attrs,
        Item::Use(item) => &item.attrs,
        _ => &[]
    }
}

/// Best-effort name of an item.
pub(crate) fn item_ident(item: &Item) -> Option<&Ident> {
    match item {
        Item::Const(item) => Some(&item.ident),
        Item::Enum(item) => Some(&item.ident),
        Item::ExternCrate(item) => Some(&item.ident),
        Item::Fn(item) => Some(&item.sig.ident),
        Item::Mod(item) => Some(&item.ident),
        Item::Static(item) => Some(&item.ident),
        Item::Struct(item) => Some(&item.ident),
        Item::Trait(item) => Some(&item.ident),
        Item::TraitAlias(item) => Some(&item.ident),
        Item::Type(item) => Some(&item.ident),
        Item::Union(item) => Some(&item.ident),
        _ => None
    }
}

fn item_name(item: &Item) -> String {
    item_ident(item).map_or_else(|| "<item>".to_owned(), ToString::to_string)
}
