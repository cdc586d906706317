// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use syn::{File, ItemImpl, parse_quote};

use super::*;
use crate::{
    parse::TypeArgs,
    scan::{Scanned, scan_file, scan_impl},
    signature
};

fn messages(ty: &AnnotatedType) -> Vec<String> {
    let mut diagnostics = Diagnostics::default();
    check_type(ty, &mut diagnostics);
    for method in &ty.methods {
        let params = signature::build(&method.method.sig);
        check_parameters(method, &params, &mut diagnostics);
    }
    match diagnostics.finish() {
        Ok(()) => Vec::new(),
        Err(err) => err.into_iter().map(|e| e.to_string()).collect()
    }
}

fn scan(block: ItemImpl) -> AnnotatedType {
    scan_impl(TypeArgs::default(), &block, Nesting::TopLevel, &[])
}

fn scan_one(file: File) -> AnnotatedType {
    match scan_file(&file, &[]).into_iter().next() {
        Some(Scanned::Type(ty)) => ty,
        other => panic!("expected annotated type, got {other:?}")
    }
}

#[test]
fn valid_type_has_no_diagnostics() {
    let ty = scan(parse_quote! {
        impl MainActivity {
            #[requires_permission("WRITE_STORAGE", "READ_CONTACTS")]
            #[before_request(pre)]
            #[on_denied(on_deny)]
            pub fn do_something(&self, label: String, count: i32) {}
        }
    });
    assert!(messages(&ty).is_empty());
}

#[test]
fn trait_impl_is_rejected() {
    let ty = scan(parse_quote! {
        impl Default for Screen {
            fn default() -> Self { Screen }
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("not trait implementations"));
}

#[test]
fn private_nested_module_reports_both_rules() {
    let ty = scan_one(parse_quote! {
        mod hidden {
            #[runtime_permissions]
            impl Screen {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("private module `hidden`"));
    assert!(messages[1].contains("top-level"));
}

#[test]
fn public_nested_module_reports_top_level_only() {
    let ty = scan_one(parse_quote! {
        pub mod screens {
            #[runtime_permissions]
            impl Screen {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("found one inside `mod screens`"));
}

#[test]
fn function_body_nesting_is_rejected() {
    let ty = scan_one(parse_quote! {
        fn build() {
            #[runtime_permissions]
            impl Screen {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("inside `fn build`"));
}

#[test]
fn type_parameters_are_accepted() {
    let ty = scan(parse_quote! {
        impl<T: Clone> Screen<T> where T: Send {
            #[requires_permission("A")]
            fn show(&self, value: T) {}
        }
    });
    assert!(messages(&ty).is_empty());
}

#[test]
fn lifetime_and_const_parameters_are_rejected() {
    let ty = scan(parse_quote! {
        impl<'a, const N: usize> Screen<'a, N> {}
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("lifetime parameters are not supported"));
    assert!(messages[1].contains("const parameters are not supported"));
}

#[test]
fn unnamed_owner_is_rejected() {
    let ty = scan(parse_quote! {
        impl [u8; 4] {}
    });
    assert!(messages(&ty)[0].contains("named type"));
}

#[test]
fn receiver_rules() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            fn by_value(self) {}

            #[requires_permission("A")]
            fn exclusive(&mut self) {}

            #[requires_permission("A")]
            fn associated() {}

            #[requires_permission("A")]
            fn shared(&self) {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 3);
    assert!(messages[0].contains("`by_value` must take `&self`"));
    assert!(messages[1].contains("`exclusive` must take `&self`"));
    assert!(messages[2].contains("`associated` must take `&self`"));
}

#[test]
fn method_modifiers_are_rejected() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            async fn fetch(&self) {}

            #[requires_permission("A")]
            fn pick<T>(&self, value: T) {}

            #[requires_permission("A")]
            unsafe fn poke(&self) {}

            #[requires_permission("A")]
            extern "C" fn call(&self) {}
        }
    });
    let messages = messages(&ty);
    assert!(messages.iter().any(|m| m.contains("`fetch` cannot be async")));
    assert!(messages.iter().any(|m| m.contains("`pick` cannot be generic")));
    assert!(messages.iter().any(|m| m.contains("`poke` cannot be unsafe")));
    assert!(messages.iter().any(|m| m.contains("`call` cannot declare an ABI")));
}

#[test]
fn unresolved_parameter_names_method() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            fn show(&self, id: i32, title: &str) {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("cannot resolve type of parameter 1 of `show`"));
}

#[test]
fn colliding_entry_points_are_rejected() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            fn open_checked(&self) {}

            #[requires_permission("A", suffix = "_checked_checked")]
            fn open(&self) {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("already generated for `open_checked`"));
}

#[test]
fn colliding_request_code_constants_are_rejected() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            fn openCamera(&self) {}

            #[requires_permission("A")]
            fn open_camera(&self) {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert_eq!(
        messages[0],
        "request code constant `OPEN_CAMERA_REQUEST_CODE` is already generated for `openCamera`; rename one of the methods"
    );
}

#[test]
fn reserved_names_are_rejected() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A", suffix = "_requests")]
            fn pending(&self) {}
        }
    });
    let messages = messages(&ty);
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("collides with a generated dispatcher function"));
}

#[test]
fn every_problem_is_reported() {
    let ty = scan(parse_quote! {
        impl Screen {
            #[requires_permission("A")]
            fn first(self, a: &str) {}

            #[before_request(pre)]
            fn stray(&self) {}
        }
    });
    assert_eq!(messages(&ty).len(), 3);
}

#[test]
fn misplaced_marker_points_at_ident() {
    let item: Item = parse_quote! {
        enum Mode { A }
    };
    let err = misplaced_marker(&item);
    assert_eq!(
        err.to_string(),
        "#[runtime_permissions] only applies to inherent impl blocks"
    );
}

#[test]
fn diagnostics_handle_keeps_values() {
    let mut diagnostics = Diagnostics::default();
    assert_eq!(diagnostics.handle(Ok::<_, syn::Error>(1)), Some(1));
    assert!(diagnostics.is_empty());

    let failed: syn::Result<i32> = Err(syn::Error::new(proc_macro2::Span::call_site(), "nope"));
    assert_eq!(diagnostics.handle(failed), None);
    assert!(!diagnostics.is_empty());
    assert!(diagnostics.finish().is_err());
}
