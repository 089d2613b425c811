//! Core module tree for the CGE front end.

pub mod ast;
pub mod compiler;
pub mod completion;
pub mod declaration_cycle;
pub mod diagnostics;
pub mod documents;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod semantic_analyzer;
pub mod token;
pub mod version;

pub use token::{Token, TokenKind};
