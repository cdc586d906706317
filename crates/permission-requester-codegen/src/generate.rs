// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Build-script front end.
//!
//! ```text
//! source file ─ parse ─► syn::File ─ scan_file ─► Scanned*
//!                                                   │
//!              emit = "inline" ───── skipped ◄──────┤
//!              misplaced / invalid ─ TypeFailure ◄──┤
//!              repeated owner ────── TypeFailure ◄──┤
//!                                                   ▼
//!                                   synthesize ─► source_unit ─► OUT_DIR
//! ```
//!
//! Failures of one type never stop the others; they are collected in
//! [`Generation::failures`] with file positions.

use std::{
    collections::HashMap,
    env, fmt, fs,
    path::{Path, PathBuf}
};

use crate::{
    allocator::{self, RequestCodeAllocator},
    emit::{self, SourceUnit},
    error::GenerateError,
    parse::EmitMode,
    scan::{self, AnnotatedType, Scanned},
    synth::synthesize
};

/// Where and how a [`Generator`] writes.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Output directory for generated units.
    pub out_dir: PathBuf,

    /// Module the scanned file is mounted at, outermost first.
    pub module_path: Vec<String>,

    /// Print `cargo:rerun-if-changed` for every scanned file.
    pub rerun_if_changed: bool
}

impl GeneratorConfig {
    /// Write into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir:          out_dir.into(),
            module_path:      Vec::new(),
            rerun_if_changed: false
        }
    }

    /// Write into `$OUT_DIR`.
    ///
    /// # Errors
    ///
    /// [`GenerateError::MissingOutDir`] outside a build script.
    pub fn from_env() -> Result<Self, GenerateError> {
        env::var_os("OUT_DIR")
            .map(Self::new)
            .ok_or(GenerateError::MissingOutDir)
    }

    /// Module path of the scanned file, e.g. `"app::screens"`.
    pub fn module_path(mut self, path: &str) -> Self {
        self.module_path = path
            .split("::")
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();
        self
    }

    /// Toggle `cargo:rerun-if-changed` output.
    pub fn rerun_if_changed(mut self, enabled: bool) -> Self {
        self.rerun_if_changed = enabled;
        self
    }
}

/// A diagnostic for one annotated type, with its source position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeFailure {
    /// Qualified name of the offending type or item.
    pub type_name: String,

    /// 1-based line.
    pub line: usize,

    /// 1-based column.
    pub column: usize,

    /// Diagnostic text.
    pub message: String
}

impl fmt::Display for TypeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.type_name, self.line, self.column, self.message
        )
    }
}

/// Outcome of scanning one source.
#[derive(Debug, Default)]
pub struct Generation {
    /// Units for every valid `emit = "build"` type, in declaration order.
    pub units: Vec<SourceUnit>,

    /// Diagnostics for every invalid type.
    pub failures: Vec<TypeFailure>
}

impl Generation {
    /// Whether no type failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Unit generated for `type_name`.
    pub fn unit(&self, type_name: &str) -> Option<&SourceUnit> {
        self.units.iter().find(|unit| unit.type_name == type_name)
    }

    /// The units, or every failure as [`GenerateError::Diagnostics`].
    pub fn into_result(self) -> Result<Vec<SourceUnit>, GenerateError> {
        if self.failures.is_empty() {
            Ok(self.units)
        } else {
            Err(GenerateError::Diagnostics(self.failures))
        }
    }

    fn record(&mut self, type_name: &str, error: syn::Error) {
        for error in error {
            let start = error.span().start();
            let failure = TypeFailure {
                type_name: type_name.to_owned(),
                line:      start.line,
                column:    start.column + 1,
                message:   error.to_string()
            };
            tracing::debug!(%failure, "annotated type rejected");
            self.failures.push(failure);
        }
    }
}

/// Scans sources and emits companion units.
#[derive(Debug)]
pub struct Generator {
    config:    GeneratorConfig,
    allocator: &'static RequestCodeAllocator
}

impl Generator {
    /// Generator drawing codes from the process-wide allocator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_allocator(config, allocator::global())
    }

    /// Generator drawing codes from `allocator`.
    pub fn with_allocator(
        config: GeneratorConfig,
        allocator: &'static RequestCodeAllocator
    ) -> Self {
        Self {
            config,
            allocator
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate from source text without touching the file system.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Parse`] if `source` is not valid Rust. Validation
    /// problems are reported in [`Generation::failures`].
    pub fn generate_source(&self, source: &str) -> Result<Generation, GenerateError> {
        let file = syn::parse_file(source).map_err(|source| GenerateError::Parse {
            path: PathBuf::from("<source>"),
            source
        })?;
        Ok(self.generate_items(&file))
    }

    /// Generate from `path` and write every unit into the output directory.
    ///
    /// # Errors
    ///
    /// I/O and parse failures. Validation problems are reported in
    /// [`Generation::failures`]; units of valid types are still written.
    pub fn generate_file(&self, path: impl AsRef<Path>) -> Result<Generation, GenerateError> {
        self.generate_path(path.as_ref())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(path = %path.display()))]
    fn generate_path(&self, path: &Path) -> Result<Generation, GenerateError> {
        if self.config.rerun_if_changed {
            println!("cargo:rerun-if-changed={}", path.display());
        }

        let source = fs::read_to_string(path).map_err(|err| GenerateError::read(path, err))?;
        let file = syn::parse_file(&source).map_err(|source| GenerateError::Parse {
            path: path.to_path_buf(),
            source
        })?;

        let generation = self.generate_items(&file);
        self.write(&generation)?;
        Ok(generation)
    }

    /// Write `generation`'s units, leaving unchanged files untouched.
    ///
    /// # Errors
    ///
    /// [`GenerateError::Io`] when the directory or a file cannot be written.
    pub fn write(&self, generation: &Generation) -> Result<Vec<PathBuf>, GenerateError> {
        let out_dir = &self.config.out_dir;
        fs::create_dir_all(out_dir).map_err(|err| GenerateError::write(out_dir, err))?;

        generation
            .units
            .iter()
            .map(|unit| {
                let path = out_dir.join(&unit.file_name);
                let unchanged =
                    fs::read_to_string(&path).is_ok_and(|existing| existing == unit.source);
                if unchanged {
                    tracing::trace!(path = %path.display(), "unit unchanged");
                } else {
                    fs::write(&path, &unit.source).map_err(|err| GenerateError::write(&path, err))?;
                    tracing::debug!(path = %path.display(), owner = %unit.type_name, "wrote unit");
                }
                Ok(path)
            })
            .collect()
    }

    fn generate_items(&self, file: &syn::File) -> Generation {
        let mut generation = Generation::default();
        // File name → owner and mode of the first block claiming it.
        let mut claimed: HashMap<String, (String, EmitMode)> = HashMap::new();

        for scanned in scan::scan_file(file, &self.config.module_path) {
            let ty = match scanned {
                Scanned::Misplaced {
                    name,
                    error
                } => {
                    generation.record(&name, error);
                    continue;
                }
                Scanned::Type(ty) => ty
            };

            let name = ty.qualified_name();
            if ty.owner_ident().is_some() {
                let file_name = emit::file_name(&name);
                if let Some((previous, mode)) = claimed.get(&file_name)
                    && (*mode == EmitMode::Build || ty.args.emit == EmitMode::Build)
                {
                    generation.record(&name, repeated_owner(&ty, previous));
                    continue;
                }
                claimed.insert(file_name, (name.clone(), ty.args.emit));
            }

            if ty.args.emit == EmitMode::Inline {
                tracing::debug!(owner = %name, "inline type left to the attribute macro");
                continue;
            }

            match synthesize(&ty, self.allocator).and_then(|def| emit::source_unit(&def)) {
                Ok(unit) => generation.units.push(unit),
                Err(err) => generation.record(&name, err)
            }
        }

        generation
    }
}

/// A second block would overwrite the first block's companion file.
fn repeated_owner(ty: &AnnotatedType, previous: &str) -> syn::Error {
    let name = ty.qualified_name();
    let message = if name == previous {
        format!("owner `{name}` already has an annotated impl block")
    } else {
        format!(
            "companion file `{}` is already generated for `{previous}`",
            emit::file_name(&name)
        )
    };
    syn::Error::new(ty.span, message)
}
