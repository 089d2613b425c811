// scanner.rs
//! Line-oriented scanner for CGE source text.
//!
//! The scanner walks the source one character at a time, keeping a 0-based
//! line/column cursor. Line ends are surfaced as a virtual `'\n'` so that
//! comments and multi-line block comments can be tracked per physical line.

use std::collections::HashMap;

use log::trace;
use once_cell::sync::Lazy;

use crate::core::error::ScanError;
use crate::core::token::{Token, TokenKind};

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    HashMap::from([
        ("string", TokenKind::String),
        ("bool", TokenKind::Bool),
        ("int", TokenKind::Int32),
        ("int32", TokenKind::Int32),
        ("int64", TokenKind::Int64),
        ("float", TokenKind::Float32),
        ("float32", TokenKind::Float32),
        ("float64", TokenKind::Float64),
        ("list", TokenKind::List),
        ("map", TokenKind::Map),
        ("name", TokenKind::Name),
        ("version", TokenKind::Version),
        ("config", TokenKind::Config),
        ("command", TokenKind::Command),
        ("event", TokenKind::Event),
        ("type", TokenKind::Type),
        ("enum", TokenKind::Enum),
    ])
});

/// Classifies a lexeme against the keyword table, case-sensitively.
pub fn keyword(lexeme: &str) -> Option<TokenKind> {
    KEYWORDS.get(lexeme).copied()
}

pub struct Scanner {
    lines: Vec<Vec<char>>,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.lines().map(|l| l.chars().collect()).collect(),
            line: 0,
            column: 0,
            tokens: Vec::new(),
        }
    }

    /// Tokenizes the whole input. The returned stream always ends in `EOF`.
    pub fn scan(mut self) -> Result<Vec<Token>, ScanError> {
        while let Some(ch) = self.current() {
            let (line, column) = (self.line, self.column);
            match ch {
                ' ' | '\t' | '\r' | '\n' | '\u{FEFF}' => {
                    self.advance();
                }
                '{' => self.single(TokenKind::OpenCurly, ch),
                '}' => self.single(TokenKind::CloseCurly, ch),
                ':' => self.single(TokenKind::Colon, ch),
                ',' => self.single(TokenKind::Comma, ch),
                '<' => self.single(TokenKind::Less, ch),
                '>' => self.single(TokenKind::Greater, ch),
                '/' => match self.peek() {
                    Some('/') => self.line_comment(),
                    Some('*') => self.block_comment()?,
                    _ => return Err(unexpected(ch, line, column)),
                },
                c if c.is_ascii_digit() => self.version_number()?,
                c if is_identifier_start(c) => self.identifier(),
                other => return Err(unexpected(other, line, column)),
            }
        }

        let (line, column) = match self.lines.len() {
            0 => (0, 0),
            n => (n - 1, self.lines[n - 1].len()),
        };
        self.tokens.push(Token::new(TokenKind::EOF, "", line, column));
        Ok(self.tokens)
    }

    #[inline]
    fn current(&self) -> Option<char> {
        let line = self.lines.get(self.line)?;
        Some(line.get(self.column).copied().unwrap_or('\n'))
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        let line = self.lines.get(self.line)?;
        match self.column + 1 {
            c if c < line.len() => Some(line[c]),
            c if c == line.len() => Some('\n'),
            _ => self.lines.get(self.line + 1).map(|l| l.first().copied().unwrap_or('\n')),
        }
    }

    #[inline]
    fn advance(&mut self) -> Option<char> {
        let ch = self.current()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn single(&mut self, kind: TokenKind, ch: char) {
        self.tokens.push(Token::new(kind, ch.to_string(), self.line, self.column));
        self.advance();
    }

    fn text(&self, line: usize, from: usize, to: usize) -> String {
        self.lines[line][from..to].iter().collect()
    }

    fn identifier(&mut self) {
        let (line, start) = (self.line, self.column);
        while matches!(self.current(), Some(c) if is_identifier_part(c)) {
            self.advance();
        }
        let lexeme = self.text(line, start, self.column);
        let kind = keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        self.tokens.push(Token::new(kind, lexeme, line, start));
    }

    // \d+(\.\d+(\.\d+)?)?
    fn version_number(&mut self) -> Result<(), ScanError> {
        let (line, start) = (self.line, self.column);
        self.digits();
        for _ in 0..2 {
            if self.current() != Some('.') {
                break;
            }
            self.advance();
            if !matches!(self.current(), Some(c) if c.is_ascii_digit()) {
                return Err(ScanError::new(self.line, self.column, "Expected digit after '.' in version number"));
            }
            self.digits();
        }
        let lexeme = self.text(line, start, self.column);
        self.tokens.push(Token::new(TokenKind::VersionNumber, lexeme, line, start));
        Ok(())
    }

    fn digits(&mut self) {
        while matches!(self.current(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
    }

    // `// text` up to the end of the physical line, trimmed.
    fn line_comment(&mut self) {
        let line = self.line;
        self.advance();
        self.advance();
        let start = self.column;
        while !matches!(self.current(), Some('\n') | None) {
            self.advance();
        }
        let raw = self.text(line, start, self.column);
        let lead = raw.chars().take_while(|c| c.is_whitespace()).count();
        self.tokens.push(Token::new(TokenKind::Comment, raw.trim(), line, start + lead));
    }

    // `/* ... */` with nesting. One comment token per non-blank physical line,
    // with a leading `*` stripped.
    fn block_comment(&mut self) -> Result<(), ScanError> {
        let (open_line, open_column) = (self.line, self.column);
        self.advance();
        self.advance();

        // (line, column of first collected char, text)
        let mut segments: Vec<(usize, usize, String)> = vec![(self.line, self.column, String::new())];
        let mut depth = 1usize;
        loop {
            let ch = match self.current() {
                Some(c) => c,
                None => return Err(ScanError::new(open_line, open_column, "Unterminated block comment")),
            };
            if ch == '/' && self.peek() == Some('*') {
                depth += 1;
                self.advance();
                self.advance();
                continue;
            }
            if ch == '*' && self.peek() == Some('/') {
                depth -= 1;
                self.advance();
                self.advance();
                if depth == 0 {
                    break;
                }
                continue;
            }
            self.advance();
            if ch == '\n' {
                segments.push((self.line, self.column, String::new()));
            } else if let Some((_, _, text)) = segments.last_mut() {
                text.push(ch);
            }
        }
        trace!("block comment spanning {} line(s) at {}:{}", segments.len(), open_line, open_column);

        for (line, column, raw) in segments {
            let mut offset = raw.chars().take_while(|c| c.is_whitespace()).count();
            let mut rest = raw.trim_start();
            if let Some(stripped) = rest.strip_prefix('*') {
                offset += 1;
                offset += stripped.chars().take_while(|c| c.is_whitespace()).count();
                rest = stripped;
            }
            let text = rest.trim();
            if !text.is_empty() {
                self.tokens.push(Token::new(TokenKind::Comment, text, line, column + offset));
            }
        }
        Ok(())
    }
}

fn unexpected(ch: char, line: usize, column: usize) -> ScanError {
    ScanError::new(line, column, format!("Unexpected character '{}'", ch))
}

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}
