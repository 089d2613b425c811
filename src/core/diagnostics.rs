// src/core/diagnostics.rs
//! Plain and colored, file+line diagnostic rendering.

use colored::Colorize;

use crate::core::compiler::CompileUnit;
use crate::core::error::{Diagnostic, Severity};

/// Source location of a diagnostic, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
    pub len: usize, // underline length, at least 1
}

impl Span {
    pub fn single(line: usize, col: usize) -> Self {
        Self { line, col, len: 1 }
    }

    pub fn of(diag: &Diagnostic) -> Self {
        Self {
            line: diag.line(),
            col: diag.column(),
            len: diag.len(),
        }
    }
}

fn label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    }
}

/// `file:LINE:COL: error: message`, 1-based.
pub fn render_plain(filename: &str, diag: &Diagnostic) -> String {
    format!(
        "{}:{}:{}: {}: {}",
        filename,
        diag.line() + 1,
        diag.column() + 1,
        label(diag.severity()),
        diag.message()
    )
}

/// Multi-line rendering with the offending source line and a caret underline.
pub fn render_pretty(filename: &str, lines: &[String], diag: &Diagnostic) -> String {
    let span = Span::of(diag);
    let head = match diag.severity() {
        Severity::Error => "error:".bright_red().bold(),
        Severity::Warning => "warning:".bright_yellow().bold(),
    };
    let (ln, col) = (span.line + 1, span.col + 1);
    let line_text = lines.get(span.line).map(String::as_str).unwrap_or_default();

    // line number gutter
    let ln_str = format!("{:>4}", ln);
    let underline = " ".repeat(span.col) + &"^".repeat(span.len.max(1));
    let underline = match diag.severity() {
        Severity::Error => underline.bright_red(),
        Severity::Warning => underline.bright_yellow(),
    };

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", head, diag.message().bright_white()));
    out.push_str(&format!(
        "{} {}\n",
        "-->".bright_blue(),
        format!("{}:{}:{}", filename, ln, col).bright_white()
    ));
    out.push_str(&format!("{} {}\n", " ".repeat(ln_str.len()), "|".dimmed()));
    out.push_str(&format!("{} {} {}\n", ln_str.dimmed(), "|".dimmed(), line_text));
    out.push_str(&format!("{} {} {}\n", " ".repeat(ln_str.len()), "|".dimmed(), underline));
    out
}

/// Writes every diagnostic of `unit` to stderr.
pub fn print_diagnostics(filename: &str, unit: &CompileUnit, pretty: bool) {
    for diag in &unit.diagnostics {
        if pretty {
            eprintln!("{}", render_pretty(filename, &unit.lines, diag));
        } else {
            eprintln!("{}", render_plain(filename, diag));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::token::{Token, TokenKind};

    #[test]
    fn plain_is_one_based() {
        let tok = Token::new(TokenKind::Identifier, "foo", 2, 4);
        let d = Diagnostic::syntax(&tok, "Expected ':' after property name", true);
        assert_eq!(render_plain("game.cge", &d), "game.cge:3:5: error: Expected ':' after property name");
    }

    #[test]
    fn pretty_underlines_the_token() {
        colored::control::set_override(false);
        let tok = Token::new(TokenKind::Identifier, "foo", 0, 4);
        let d = Diagnostic::syntax(&tok, "boom", false);
        let out = render_pretty("f.cge", &["bar foo".to_string()], &d);
        assert!(out.contains("--> f.cge:1:5"));
        assert!(out.contains("   1 | bar foo"));
        assert!(out.contains("|     ^^^"));
    }
}
