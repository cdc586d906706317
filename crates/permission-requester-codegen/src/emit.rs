// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Source emission.
//!
//! Turns a rendered dispatcher into a self-contained source file. The tokens
//! are parsed back as a [`syn::File`] and printed with `prettyplease`, so a
//! malformed render fails here instead of in the consumer's build:
//!
//! ```text
//! // @generated by permission-requester-codegen 0.1.0. Do not edit.
//! // Source type: app::MainActivity
//!
//! /// Permission request dispatcher for `MainActivity`.
//! ...
//! ```
//!
//! File names derive from the qualified type name:
//!
//! | Qualified name | File |
//! |----------------|------|
//! | `MainActivity` | `main_activity_permission_requester.rs` |
//! | `app::ui::MainActivity` | `app_ui_main_activity_permission_requester.rs` |

use convert_case::{Case, Casing};

use crate::{model::DispatcherDef, render::render};

/// Suffix of every generated file name.
pub const FILE_SUFFIX: &str = "_permission_requester.rs";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Qualified name of the annotated type.
    pub type_name: String,

    /// File name inside the output directory.
    pub file_name: String,

    /// Formatted source, header included.
    pub source: String
}

/// Render and format the companion for `def`.
///
/// # Errors
///
/// Fails when the rendered tokens do not form a valid source file.
pub fn source_unit(def: &DispatcherDef) -> syn::Result<SourceUnit> {
    let file = syn::parse2::<syn::File>(render(def))?;
    let mut source = header(&def.qualified_name);
    source.push_str(&prettyplease::unparse(&file));

    Ok(SourceUnit {
        type_name: def.qualified_name.clone(),
        file_name: file_name(&def.qualified_name),
        source
    })
}

/// Generation-tool header naming the source type.
pub fn header(qualified_name: &str) -> String {
    format!(
        "// @generated by permission-requester-codegen {}. Do not edit.\n// Source type: {qualified_name}\n\n",
        env!("CARGO_PKG_VERSION")
    )
}

/// File name for a qualified type name.
pub fn file_name(qualified_name: &str) -> String {
    let stem = qualified_name
        .split("::")
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_case(Case::Snake))
        .collect::<Vec<_>>()
        .join("_");
    format!("{stem}{FILE_SUFFIX}")
}
