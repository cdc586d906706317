// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute macro front end.
//!
//! The annotated block is always re-emitted with its method markers
//! stripped, so the host type stays usable while diagnostics are shown:
//!
//! | Outcome | Output |
//! |---------|--------|
//! | valid, `emit = "inline"` | block + companion |
//! | valid, `emit = "build"` | block |
//! | invalid | block + `compile_error!` per problem |
//! | not an `impl` block | item + `compile_error!` |

use proc_macro2::TokenStream;
use quote::quote;

use crate::{
    allocator,
    parse::{EmitMode, TypeArgs},
    render::render,
    scan::{self, Nesting},
    synth, validate
};

/// Expand `#[runtime_permissions(args)]` applied to `item`.
pub fn expand(args: TokenStream, item: TokenStream) -> TokenStream {
    let parsed: syn::Item = match syn::parse2(item.clone()) {
        Ok(parsed) => parsed,
        Err(err) => {
            let error = err.to_compile_error();
            return quote! { #error #item };
        }
    };

    let mut block = match parsed {
        syn::Item::Impl(block) => block,
        other => {
            let error = validate::misplaced_marker(&other).to_compile_error();
            return quote! { #error #item };
        }
    };

    let args = match TypeArgs::parse(args) {
        Ok(args) => args,
        Err(err) => {
            scan::strip_markers(&mut block);
            let error = err.write_errors();
            return quote! { #error #block };
        }
    };

    let annotated = scan::scan_impl(args, &block, Nesting::TopLevel, &[]);
    scan::strip_markers(&mut block);

    let result = match annotated.args.emit {
        EmitMode::Build => synth::check(&annotated).map(|()| TokenStream::new()),
        EmitMode::Inline => {
            synth::synthesize(&annotated, allocator::global()).map(|def| render(&def))
        }
    };

    match result {
        Ok(companion) => quote! {
            #block
            #companion
        },
        Err(err) => {
            let errors = err.to_compile_error();
            quote! {
                #block
                #errors
            }
        }
    }
}
