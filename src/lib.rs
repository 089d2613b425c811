//! CGE schema language front end: scanner, parser, semantic validation and
//! declaration cycle detection, plus the editor and CLI layers built on them.
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;

pub use crate::core::compiler::{compile, compile_reader, CompileUnit, Compiler};
pub use crate::core::error::{Diagnostic, Severity};
