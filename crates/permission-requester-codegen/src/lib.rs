// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! Dispatcher generator behind `permission-requester`.
//!
//! Turns `impl` blocks marked with `#[runtime_permissions]` into companion
//! `{Type}PermissionRequester` dispatchers that run a "request, wait, resume"
//! protocol around an asynchronous permission grant.
//!
//! The same pipeline serves two front ends:
//!
//! - the `#[runtime_permissions]` attribute macro ([`expand`]), which emits
//!   the companion next to the annotated block;
//! - build scripts ([`Generator`]), which scan a source file and write one
//!   formatted source unit per annotated type into `OUT_DIR`.
//!
//! # Architecture
//!
//! ```text
//! lib.rs
//! │
//! ├── parse/       → Marker schema (TypeArgs, PermissionMarker, hooks)
//! ├── scan.rs      → Declaration scanner (AnnotatedType, AnnotatedMethod)
//! ├── signature.rs → Parameter descriptors (primitive / reference types)
//! ├── allocator.rs → Process-wide request code counter
//! ├── validate.rs  → Structural checks with located diagnostics
//! ├── synth.rs     → AnnotatedType → DispatcherDef
//! ├── model.rs     → Intermediate representation (DispatcherDef, EntryPointDef)
//! ├── render.rs    → DispatcherDef → TokenStream (pure)
//! ├── emit.rs      → TokenStream → formatted source unit
//! ├── expand.rs    → Attribute macro front end
//! └── generate.rs  → Build script front end
//! ```
//!
//! # Build Script Usage
//!
//! ```rust,ignore
//! // build.rs
//! use permission_requester_codegen::{Generator, GeneratorConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeneratorConfig::from_env()?.rerun_if_changed(true);
//!     Generator::new(config)
//!         .generate_file("src/screens.rs")?
//!         .into_result()?;
//!     Ok(())
//! }
//! ```
//!
//! ```rust,ignore
//! // src/screens.rs
//! #[runtime_permissions(emit = "build")]
//! impl Camera {
//!     #[requires_permission("android.permission.CAMERA")]
//!     pub fn snap(&self, label: String) { /* ... */ }
//! }
//!
//! include!(concat!(env!("OUT_DIR"), "/camera_permission_requester.rs"));
//! ```

pub mod allocator;
pub mod emit;
mod error;
mod expand;
mod generate;
pub mod model;
pub mod parse;
pub mod render;
pub mod scan;
pub mod signature;
pub mod synth;
pub mod validate;

pub use allocator::RequestCodeAllocator;
pub use emit::{FILE_SUFFIX, SourceUnit};
pub use error::GenerateError;
pub use expand::expand;
pub use generate::{Generation, Generator, GeneratorConfig, TypeFailure};
pub use model::{DispatcherDef, EntryPointDef};
pub use synth::synthesize;
