//! Open-document state for editor integrations.
//!
//! Each document keeps its text and the result of compiling the latest
//! revision. Compiles run outside the lock; the last write wins.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::core::ast::Object;
use crate::core::compiler::{CompileUnit, Compiler};
use crate::core::completion::{self, CompletionItem};
use crate::core::error::Severity;

/// 0-based line and character (counted in chars).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

/// A text edit. Without a range, `text` replaces the whole document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentChange {
    pub range: Option<Range>,
    pub text: String,
}

impl ContentChange {
    pub fn full(text: impl Into<String>) -> Self {
        Self { range: None, text: text.into() }
    }

    pub fn ranged(range: Range, text: impl Into<String>) -> Self {
        Self {
            range: Some(range),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentDiagnostic {
    pub range: Range,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document '{0}' is not open")]
    NotOpen(String),
    #[error("edit range ends before it starts")]
    InvalidRange,
}

struct Document {
    source: String,
    unit: CompileUnit,
    /// Objects of the last revision that compiled without errors.
    completion_objects: Vec<Object>,
}

pub struct DocumentStore {
    compiler: Compiler,
    documents: RwLock<HashMap<String, Document>>,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new(Compiler::new())
    }
}

impl DocumentStore {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub fn open(&self, uri: &str, text: impl Into<String>) {
        let source = text.into();
        let unit = self.compiler.compile(&source);
        debug!("open {}: {} diagnostic(s)", uri, unit.diagnostics.len());
        let completion_objects = if unit.has_errors() { Vec::new() } else { unit.objects.clone() };
        self.write().insert(
            uri.to_string(),
            Document {
                source,
                unit,
                completion_objects,
            },
        );
    }

    /// Applies `changes` in order and recompiles.
    pub fn change(&self, uri: &str, changes: &[ContentChange]) -> Result<(), DocumentError> {
        let (mut source, previous) = {
            let docs = self.read();
            let doc = docs.get(uri).ok_or_else(|| DocumentError::NotOpen(uri.to_string()))?;
            (doc.source.clone(), doc.completion_objects.clone())
        };
        for change in changes {
            source = apply(&source, change)?;
        }

        let unit = self.compiler.compile(&source);
        debug!("change {}: {} diagnostic(s)", uri, unit.diagnostics.len());
        let completion_objects = if unit.has_errors() { previous } else { unit.objects.clone() };

        let mut docs = self.write();
        match docs.get_mut(uri) {
            Some(doc) => {
                *doc = Document {
                    source,
                    unit,
                    completion_objects,
                };
                Ok(())
            }
            // closed while compiling
            None => Err(DocumentError::NotOpen(uri.to_string())),
        }
    }

    pub fn close(&self, uri: &str) -> bool {
        self.write().remove(uri).is_some()
    }

    pub fn is_open(&self, uri: &str) -> bool {
        self.read().contains_key(uri)
    }

    pub fn text(&self, uri: &str) -> Option<String> {
        self.read().get(uri).map(|d| d.source.clone())
    }

    pub fn diagnostics(&self, uri: &str) -> Option<Vec<DocumentDiagnostic>> {
        let docs = self.read();
        let doc = docs.get(uri)?;
        Some(
            doc.unit
                .diagnostics
                .iter()
                .map(|d| DocumentDiagnostic {
                    range: Range {
                        start: Position::new(d.line(), d.column()),
                        end: Position::new(d.line(), d.column() + d.len()),
                    },
                    severity: d.severity(),
                    message: d.message().to_string(),
                })
                .collect(),
        )
    }

    pub fn completions(&self, uri: &str, at: Position) -> Option<Vec<CompletionItem>> {
        let docs = self.read();
        let doc = docs.get(uri)?;
        Some(completion::complete_at(
            &doc.source,
            at.line,
            at.character,
            &doc.completion_objects,
            self.compiler.version(),
        ))
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Document>> {
        self.documents.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Document>> {
        self.documents.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn apply(source: &str, change: &ContentChange) -> Result<String, DocumentError> {
    let Some(range) = change.range else {
        return Ok(change.text.clone());
    };
    let start = offset(source, range.start);
    let end = offset(source, range.end);
    if end < start {
        return Err(DocumentError::InvalidRange);
    }
    let mut out = String::with_capacity(source.len() - (end - start) + change.text.len());
    out.push_str(&source[..start]);
    out.push_str(&change.text);
    out.push_str(&source[end..]);
    Ok(out)
}

// Byte offset of `pos`, clamped to the end of its line and of the text.
fn offset(source: &str, pos: Position) -> usize {
    let mut line_start = 0;
    for _ in 0..pos.line {
        match source[line_start..].find('\n') {
            Some(i) => line_start += i + 1,
            None => return source.len(),
        }
    }
    let line_end = source[line_start..]
        .find('\n')
        .map(|i| line_start + i)
        .unwrap_or(source.len());
    source[line_start..line_end]
        .char_indices()
        .nth(pos.character)
        .map(|(i, _)| line_start + i)
        .unwrap_or(line_end)
}
