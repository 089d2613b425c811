//! Diagnostic data produced by the front end.
//!
//! Every stage reports problems as plain values; nothing here carries behaviour
//! beyond accessors used by renderers and the editor layer.

use serde::Serialize;
use thiserror::Error;

use crate::core::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Lexical failure. Fatal for the whole compile.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ScanError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl ScanError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { line, column, message: message.into() }
    }
}

/// Syntax error at a token.
///
/// `in_block` records whether the cursor was already inside an open `{ ... }`
/// when the error happened, which decides how far declaration-level recovery
/// has to skip.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ParseError {
    pub token: Token,
    pub message: String,
    pub in_block: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticErrorKind {
    DuplicateIdentifier,
    MultipleConfig,
    UndefinedType,
    DeclarationCycle,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub token: Token,
    pub message: String,
}

/// Language version mismatch between the file and the compiler. Never blocks a compile.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct VersionWarning {
    pub token: Token,
    pub file_version: String,
    pub compiler_version: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", rename_all = "lowercase")]
pub enum Diagnostic {
    Scan(ScanError),
    Parse(ParseError),
    Semantic(SemanticError),
    Version(VersionWarning),
}

impl Diagnostic {
    pub fn syntax(token: &Token, message: impl Into<String>, in_block: bool) -> Self {
        Diagnostic::Parse(ParseError {
            token: token.clone(),
            message: message.into(),
            in_block,
        })
    }

    pub fn semantic(kind: SemanticErrorKind, token: &Token, message: impl Into<String>) -> Self {
        Diagnostic::Semantic(SemanticError {
            kind,
            token: token.clone(),
            message: message.into(),
        })
    }

    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Version(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Scan(e) => &e.message,
            Diagnostic::Parse(e) => &e.message,
            Diagnostic::Semantic(e) => &e.message,
            Diagnostic::Version(w) => &w.message,
        }
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            Diagnostic::Scan(_) => None,
            Diagnostic::Parse(e) => Some(&e.token),
            Diagnostic::Semantic(e) => Some(&e.token),
            Diagnostic::Version(w) => Some(&w.token),
        }
    }

    pub fn line(&self) -> usize {
        match self {
            Diagnostic::Scan(e) => e.line,
            _ => self.token().map(|t| t.line).unwrap_or(0),
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Diagnostic::Scan(e) => e.column,
            _ => self.token().map(|t| t.column).unwrap_or(0),
        }
    }

    /// Underline length in characters; never zero so EOF still gets a caret.
    pub fn len(&self) -> usize {
        self.token().map(|t| t.len()).unwrap_or(1).max(1)
    }

    /// Recovery hint: only syntax errors raised inside a block carry it.
    pub fn in_block(&self) -> bool {
        matches!(self, Diagnostic::Parse(ParseError { in_block: true, .. }))
    }

    pub fn semantic_kind(&self) -> Option<SemanticErrorKind> {
        match self {
            Diagnostic::Semantic(e) => Some(e.kind),
            _ => None,
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.message(), self.line() + 1, self.column() + 1)
    }
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::Scan(e)
    }
}
