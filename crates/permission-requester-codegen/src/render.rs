// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Companion rendering.
//!
//! Pure translation of a [`DispatcherDef`] into tokens. For an owner
//! `MainActivity` with one annotated method the output reads:
//!
//! ```rust,ignore
//! pub struct MainActivityPermissionRequester;
//!
//! impl MainActivityPermissionRequester {
//!     pub const DO_SOMETHING_REQUEST_CODE: RequestCode = RequestCode::new(2458);
//!
//!     fn continuations() -> &'static ContinuationRegistry { /* static */ }
//!
//!     pub fn do_something_checked(arg0: String, arg1: i32, host: &Arc<MainActivity>) {
//!         <MainActivity>::pre(&host);
//!         const PERMISSIONS: &[&str] = &["WRITE_STORAGE", "READ_CONTACTS"];
//!         let code = Self::DO_SOMETHING_REQUEST_CODE;
//!         let grant: Continuation = /* <MainActivity>::do_something(&host, arg0, arg1) */;
//!         let deny: Option<Continuation> = /* <MainActivity>::on_deny(&host) */;
//!         Self::continuations().register(code, grant, deny);
//!         PermissionAuthority::request_permissions(&**host, PERMISSIONS, code);
//!     }
//!
//!     pub fn on_request_permissions_result(
//!         code: RequestCode,
//!         permissions: &[&str],
//!         grant_results: &[GrantResult]
//!     ) -> Completion { /* registry completion */ }
//!
//!     pub fn pending_requests() -> usize { /* ... */ }
//!     pub fn is_pending(code: RequestCode) -> bool { /* ... */ }
//! }
//! ```
//!
//! Every path into the runtime goes through the configured crate path, so
//! the output does not depend on the caller's imports. Owner methods are
//! called through the owner type, never through the `Arc`, so a method named
//! `clone` or `as_ref` still reaches the owner.
//!
//! A generic `impl<T> Holder<T>` yields `HolderPermissionRequester<T>` and an
//! `impl<T>` carrying `Send + Sync + 'static` bounds for the owner and
//! `Send + 'static` bounds for every captured parameter type.

use proc_macro2::{Literal, TokenStream};
use quote::quote;
use syn::{WhereClause, parse_quote};

use crate::{
    model::{DispatcherDef, EntryPointDef},
    parse::GrantPolicy
};

/// Render the companion struct and its `impl` block.
pub fn render(def: &DispatcherDef) -> TokenStream {
    let DispatcherDef {
        ident,
        vis,
        krate,
        generics,
        ..
    } = def;

    let declaration = render_declaration(def);
    let (impl_generics, ty_generics, _) = generics.split_for_impl();
    let where_clause = companion_bounds(def);
    let constants = def.entry_points.iter().map(|ep| render_code_const(def, ep));
    let entry_points = def.entry_points.iter().map(|ep| render_entry_point(def, ep));

    quote! {
        #declaration

        impl #impl_generics #ident #ty_generics #where_clause {
            #(#constants)*

            fn continuations() -> &'static #krate::ContinuationRegistry {
                static CONTINUATIONS: #krate::ContinuationRegistry = #krate::ContinuationRegistry::new();
                &CONTINUATIONS
            }

            #(#entry_points)*

            /// Deliver the platform's answer for `code`.
            ///
            /// Runs the grant continuation when every result is granted and the
            /// deny continuation otherwise. Unknown or already resolved codes
            /// are ignored.
            #vis fn on_request_permissions_result(
                code: #krate::RequestCode,
                permissions: &[&str],
                grant_results: &[#krate::GrantResult]
            ) -> #krate::Completion {
                Self::continuations().complete(code, permissions, grant_results)
            }

            /// Number of requests awaiting an answer.
            #vis fn pending_requests() -> usize {
                Self::continuations().pending()
            }

            /// Whether a request under `code` awaits an answer.
            #vis fn is_pending(code: #krate::RequestCode) -> bool {
                Self::continuations().is_pending(code)
            }
        }
    }
}

/// Companion struct. A generic owner gets a marker field over its type
/// parameters and hand-written impls, so the companion stays `Copy` and
/// `Default` whatever the parameters are.
fn render_declaration(def: &DispatcherDef) -> TokenStream {
    let DispatcherDef {
        ident,
        vis,
        ..
    } = def;

    let summary = format!(" Permission request dispatcher for `{}`.", def.owner_name());
    let forwarding = format!(
        " Forward platform answers to [`{ident}::on_request_permissions_result`]."
    );
    let params: Vec<_> = def
        .generics
        .type_params()
        .map(|param| &param.ident)
        .collect();

    if params.is_empty() {
        return quote! {
            #[doc = #summary]
            #[doc = ""]
            #[doc = #forwarding]
            #[derive(Debug, Clone, Copy, Default)]
            #vis struct #ident;
        };
    }

    let name = ident.to_string();
    quote! {
        #[doc = #summary]
        #[doc = ""]
        #[doc = #forwarding]
        #vis struct #ident<#(#params),*>(::core::marker::PhantomData<fn() -> (#(#params,)*)>);

        impl<#(#params),*> ::core::fmt::Debug for #ident<#(#params),*> {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#name)
            }
        }

        impl<#(#params),*> ::core::clone::Clone for #ident<#(#params),*> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<#(#params),*> ::core::marker::Copy for #ident<#(#params),*> {}

        impl<#(#params),*> ::core::default::Default for #ident<#(#params),*> {
            fn default() -> Self {
                Self(::core::marker::PhantomData)
            }
        }
    }
}

/// `where` clause of the companion `impl`.
///
/// A generic owner only satisfies the continuation's `Send + 'static`
/// requirements under bounds, so they are spelled out for the owner and for
/// every captured parameter type.
fn companion_bounds(def: &DispatcherDef) -> Option<WhereClause> {
    let mut where_clause = def.generics.where_clause.clone();
    if def.generics.type_params().next().is_none() {
        return where_clause;
    }

    let krate = &def.krate;
    let owner = &def.owner;
    let predicates = &mut where_clause
        .get_or_insert_with(|| parse_quote!(where))
        .predicates;

    predicates.push(parse_quote! {
        #owner: #krate::PermissionAuthority + ::core::marker::Send + ::core::marker::Sync + 'static
    });
    for param in def.entry_points.iter().flat_map(|ep| &ep.params) {
        let ty = &param.ty;
        predicates.push(parse_quote!(#ty: ::core::marker::Send + 'static));
    }

    where_clause
}

fn render_code_const(def: &DispatcherDef, ep: &EntryPointDef) -> TokenStream {
    let krate = &def.krate;
    let vis = &ep.vis;
    let name = &ep.code_const;
    let value = Literal::u32_unsuffixed(ep.code.get());
    let doc = format!(" Request code of [`Self::{}`].", ep.ident);

    quote! {
        #[doc = #doc]
        #vis const #name: #krate::RequestCode = #krate::RequestCode::new(#value);
    }
}

fn render_entry_point(def: &DispatcherDef, ep: &EntryPointDef) -> TokenStream {
    let krate = &def.krate;
    let owner = &def.owner;
    let EntryPointDef {
        ident,
        target,
        vis,
        permissions,
        code_const,
        ..
    } = ep;

    let params = ep.params.iter().map(|param| {
        let name = &param.name;
        let ty = &param.ty;
        quote! { #name: #ty }
    });
    let args: Vec<_> = ep.params.iter().map(|param| &param.name).collect();

    let doc = format!(
        " Calls `{target}` once {} granted.",
        quoted_list(&ep.permission_names())
    );

    let before = ep
        .before
        .as_ref()
        .map(|hook| quote! { <#owner>::#hook(&host); });

    let call = if ep.returns_value {
        quote! { let _ = <#owner>::#target(&host #(, #args)*); }
    } else {
        quote! { <#owner>::#target(&host #(, #args)*); }
    };

    let fast_path = match def.policy {
        GrantPolicy::RoundTrip => TokenStream::new(),
        GrantPolicy::SkipIfGranted => quote! {
            if #krate::PermissionAuthority::all_granted(&**host, PERMISSIONS) {
                #call
                return;
            }
        }
    };

    let deny = match &ep.on_denied {
        Some(hook) => quote! {
            {
                let host = ::std::sync::Arc::clone(host);
                let continuation: #krate::Continuation = ::std::boxed::Box::new(move || {
                    <#owner>::#hook(&host);
                });
                ::std::option::Option::Some(continuation)
            }
        },
        None => quote! { ::std::option::Option::None }
    };

    quote! {
        #[doc = #doc]
        #[allow(clippy::too_many_arguments)]
        #vis fn #ident(#(#params,)* host: &::std::sync::Arc<#owner>) {
            #before
            const PERMISSIONS: &[&str] = &[#(#permissions),*];
            let code = Self::#code_const;
            #fast_path
            let grant: #krate::Continuation = {
                let host = ::std::sync::Arc::clone(host);
                ::std::boxed::Box::new(move || {
                    #call
                })
            };
            let deny: ::std::option::Option<#krate::Continuation> = #deny;
            Self::continuations().register(code, grant, deny);
            #krate::PermissionAuthority::request_permissions(&**host, PERMISSIONS, code);
        }
    }
}

/// `["A"]` → "`A` is", `["A", "B"]` → "`A` and `B` are".
fn quoted_list(names: &[String]) -> String {
    let quoted: Vec<_> = names.iter().map(|name| format!("`{name}`")).collect();
    match quoted.as_slice() {
        [] => String::from("nothing is"),
        [single] => format!("{single} is"),
        [init @ .., last] => format!("{} and {last} are", init.join(", "))
    }
}
