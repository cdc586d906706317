// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Build-script error type.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::generate::TypeFailure;

/// Failure of a [`Generator`](crate::Generator) run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// `OUT_DIR` is not set.
    #[error("OUT_DIR is not set; run inside a build script or pass an output directory")]
    MissingOutDir,

    /// Reading a source file or writing a unit failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        /// `"failed to read"` or `"failed to write"`.
        action: &'static str,
        /// File involved.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error
    },

    /// The source file is not valid Rust.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File involved.
        path:   PathBuf,
        /// Underlying error.
        #[source]
        source: syn::Error
    },

    /// One or more annotated types failed validation.
    #[error("{} permission diagnostic(s):\n{}", .0.len(), join(.0))]
    Diagnostics(Vec<TypeFailure>)
}

impl GenerateError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action: "failed to read",
            path: path.into(),
            source
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action: "failed to write",
            path: path.into(),
            source
        }
    }
}

fn join(failures: &[TypeFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
