// src/core/compiler.rs
//! CGE front-end pipeline.
//! Runs scanning, parsing (with interleaved semantic checks) and cycle detection,
//! and collects everything into one [`CompileUnit`].

use std::io::Read;

use log::debug;
use serde::Serialize;

use crate::core::{
    ast::{Metadata, Object, ObjectId, ObjectKind},
    declaration_cycle,
    error::{Diagnostic, Severity},
    parser::Parser,
    scanner::Scanner,
    version::CGE_VERSION,
};

/// Result of one compile. Created once and never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct CompileUnit {
    pub metadata: Metadata,
    pub objects: Vec<Object>,
    pub diagnostics: Vec<Diagnostic>,
    /// Source split into lines, for renderers.
    #[serde(skip)]
    pub lines: Vec<String>,
}

impl CompileUnit {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity() == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity() == Severity::Warning)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id.0)
    }

    /// The config singleton; present in every unit that got past scanning.
    pub fn config(&self) -> Option<&Object> {
        self.objects.iter().find(|o| o.kind == ObjectKind::Config)
    }

    /// Types and enums, in object-list order.
    pub fn declared_types(&self) -> impl Iterator<Item = &Object> {
        self.objects
            .iter()
            .filter(|o| matches!(o.kind, ObjectKind::Type | ObjectKind::Enum))
    }
}

/// Front-end driver bound to one language version.
#[derive(Debug, Clone)]
pub struct Compiler {
    version: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_version(CGE_VERSION)
    }

    pub fn with_version(version: impl Into<String>) -> Self {
        Compiler { version: version.into() }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Compiles `source`. A scan error ends the compile with that single
    /// diagnostic and no objects.
    pub fn compile(&self, source: &str) -> CompileUnit {
        let lines = source.lines().map(str::to_string).collect();

        let tokens = match Scanner::new(source).scan() {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!("scan failed: {}", e);
                return CompileUnit {
                    metadata: Metadata::default(),
                    objects: Vec::new(),
                    diagnostics: vec![e.into()],
                    lines,
                };
            }
        };
        debug!("scanner: {} tokens", tokens.len());

        let output = Parser::new(tokens, &self.version).parse();
        let mut diagnostics = output.diagnostics;
        let cycles = declaration_cycle::detect(&output.objects);
        debug!("cycle detector: {} cycle(s)", cycles.len());
        diagnostics.extend(cycles);

        CompileUnit {
            metadata: output.metadata,
            objects: output.objects,
            diagnostics,
            lines,
        }
    }

    pub fn compile_reader(&self, mut reader: impl Read) -> std::io::Result<CompileUnit> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(self.compile(&source))
    }
}

/// Compiles `source` against `compiler_version`.
pub fn compile(source: &str, compiler_version: &str) -> CompileUnit {
    Compiler::with_version(compiler_version).compile(source)
}

/// Like [`compile`], reading the source from `reader` first.
pub fn compile_reader(reader: impl Read, compiler_version: &str) -> std::io::Result<CompileUnit> {
    Compiler::with_version(compiler_version).compile_reader(reader)
}
