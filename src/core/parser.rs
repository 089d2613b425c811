//! Recursive-descent parser for CGE with declaration- and property-level recovery.
//!
//! ```text
//! file        := name version declaration* EOF
//! declaration := comment* ( "config" block | ("command"|"event"|"type"|"enum") identifier block )
//! block       := "{" property ("," property)* ","? "}"
//! property    := comment* identifier ":" propertytype
//! propertytype:= scalar | ("list"|"map") "<" propertytype ">" | identifier
//!              | ("type"|"enum") identifier block
//! ```

use log::{debug, trace};

use crate::core::ast::{Metadata, Object, ObjectId, ObjectKind, Property, PropertyType};
use crate::core::error::{Diagnostic, VersionWarning};
use crate::core::semantic_analyzer::SemanticAnalyzer;
use crate::core::token::{Token, TokenKind};
use crate::core::version;

type ParseResult<T> = Result<T, Diagnostic>;

/// Everything the parser hands to the later stages.
#[derive(Debug)]
pub struct ParseOutput {
    pub metadata: Metadata,
    pub objects: Vec<Object>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    compiler_version: String,
    sema: SemanticAnalyzer,
    objects: Vec<Object>,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    /// Create new parser instance; ensure trailing EOF token present
    pub fn new(mut tokens: Vec<Token>, compiler_version: &str) -> Self {
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::EOF) {
            let (line, column) = tokens.last().map(|t| (t.line, t.column + t.len())).unwrap_or((0, 0));
            tokens.push(Token::new(TokenKind::EOF, "", line, column));
        }
        Parser {
            tokens,
            pos: 0,
            compiler_version: compiler_version.to_string(),
            sema: SemanticAnalyzer::new(),
            objects: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn parse(mut self) -> ParseOutput {
        let metadata = self.metadata();

        loop {
            self.skip_dangling_comments();
            if self.is_at_end() {
                break;
            }
            let start = self.pos;
            match self.declaration() {
                Ok(object) => self.objects.push(object),
                Err(diag) => {
                    let in_block = diag.in_block();
                    self.diagnostics.push(diag);
                    self.skip_block(in_block, start);
                    if self.pos == start {
                        self.advance();
                    }
                }
            }
        }

        let mut objects = std::mem::take(&mut self.objects);
        let sema = std::mem::take(&mut self.sema);
        self.diagnostics.extend(sema.finish(&mut objects));
        debug!("parsed {} object(s), {} diagnostic(s)", objects.len(), self.diagnostics.len());

        ParseOutput {
            metadata,
            objects,
            diagnostics: self.diagnostics,
        }
    }

    /* ── Header ──────────────────────────────────────────── */

    fn metadata(&mut self) -> Metadata {
        let comments = self.comments();
        let name = match self.name() {
            Ok(name) => name,
            Err(diag) => {
                self.diagnostics.push(diag);
                String::new()
            }
        };
        let version = match self.version() {
            Ok(token) => {
                self.check_version(&token);
                token.lexeme
            }
            Err(diag) => {
                self.diagnostics.push(diag);
                String::new()
            }
        };
        Metadata { name, comments, version }
    }

    fn name(&mut self) -> ParseResult<String> {
        self.consume(TokenKind::Name, "Expected 'name' keyword", false)?;
        let name = self.consume(TokenKind::Identifier, "Expected name of game after 'name'", false)?;
        Ok(name.lexeme.clone())
    }

    fn version(&mut self) -> ParseResult<Token> {
        self.consume(TokenKind::Version, "Expected 'version' keyword", false)?;
        let version = self.consume(TokenKind::VersionNumber, "Expected CGE version after 'version'", false)?;
        Ok(version.clone())
    }

    fn check_version(&mut self, token: &Token) {
        if version::is_compatible(&token.lexeme, &self.compiler_version) {
            return;
        }
        debug!("version mismatch: file v{}, compiler v{}", token.lexeme, self.compiler_version);
        self.diagnostics.push(Diagnostic::Version(VersionWarning {
            token: token.clone(),
            file_version: token.lexeme.clone(),
            compiler_version: self.compiler_version.clone(),
            message: format!(
                "CGE version mismatch: input file v{}, compiler v{}; there might be parsing issues",
                token.lexeme, self.compiler_version
            ),
        }));
    }

    /* ── Declarations ────────────────────────────────────── */

    fn declaration(&mut self) -> ParseResult<Object> {
        let comments = self.comments();
        let keyword = self.peek().clone();
        let Some(kind) = ObjectKind::from_keyword(keyword.kind) else {
            return Err(self.err_here("Expected 'config', 'command', 'event', 'type' or 'enum' declaration", false));
        };
        self.advance();

        if kind == ObjectKind::Config {
            self.sema.declare_config(&keyword)?;
            self.consume(TokenKind::OpenCurly, "Expected block after 'config'", false)?;
            let mut properties = Vec::new();
            self.block(&mut properties)?;
            return Ok(Object {
                kind,
                name: String::new(),
                name_token: Some(keyword),
                comments,
                properties,
            });
        }

        let name = self
            .consume(TokenKind::Identifier, &format!("Expected identifier after '{}' keyword", kind), false)?
            .clone();
        self.sema.declare(kind, &name)?;
        self.consume(TokenKind::OpenCurly, &format!("Expected block after {} name", kind), false)?;

        let mut properties = Vec::new();
        if kind == ObjectKind::Enum {
            self.enum_block(&mut properties)?;
        } else {
            self.block(&mut properties)?;
        }
        Ok(Object {
            kind,
            name: name.lexeme.clone(),
            name_token: Some(name),
            comments,
            properties,
        })
    }

    fn block(&mut self, properties: &mut Vec<Property>) -> ParseResult<()> {
        self.block_items(properties, Self::property)
    }

    fn enum_block(&mut self, properties: &mut Vec<Property>) -> ParseResult<()> {
        self.block_items(properties, Self::enum_value)
    }

    // Parses items up to and including the closing `}`. The opening `{` is already consumed.
    fn block_items(
        &mut self,
        properties: &mut Vec<Property>,
        item: fn(&mut Self) -> ParseResult<Property>,
    ) -> ParseResult<()> {
        loop {
            self.skip_dangling_comments();
            if self.match_token(TokenKind::CloseCurly) {
                return Ok(());
            }
            if self.is_at_end() {
                return Err(self.err_here("Expected '}' after block", true));
            }
            let ahead = self.peek_past_comments();
            if ahead.kind.starts_declaration() {
                // Unterminated block running into the next declaration: keep what we
                // have and leave its doc comments in place.
                let diag = Diagnostic::syntax(ahead, "Expected '}' after block", true);
                self.diagnostics.push(diag);
                return Ok(());
            }

            match item(self) {
                Ok(p) => properties.push(p),
                Err(diag) => {
                    trace!("property-level recovery at {}:{}", diag.line(), diag.column());
                    self.diagnostics.push(diag);
                    self.skip_property();
                    continue;
                }
            }

            if self.match_token(TokenKind::Comma) || self.check(TokenKind::CloseCurly) || self.is_at_end() {
                continue;
            }
            let next = self.peek_past_comments().kind;
            match next {
                TokenKind::Identifier => {
                    let diag = self.err_here("Expected ',' between properties", true);
                    self.diagnostics.push(diag);
                }
                TokenKind::CloseCurly | TokenKind::EOF => {}
                k if k.starts_declaration() => {}
                _ => return Err(self.err_here("Expected ',' or '}' after property", true)),
            }
        }
    }

    fn property(&mut self) -> ParseResult<Property> {
        let comments = self.comments();
        let name = self.consume(TokenKind::Identifier, "Expected property name", true)?.clone();
        self.consume(TokenKind::Colon, "Expected ':' after property name", true)?;
        let ty = self.property_type(&comments, ':')?;
        Ok(Property {
            name: name.lexeme.clone(),
            name_token: name,
            comments,
            ty: Some(ty),
        })
    }

    fn enum_value(&mut self) -> ParseResult<Property> {
        let comments = self.comments();
        let name = self.consume(TokenKind::Identifier, "Expected enum value", true)?.clone();
        Ok(Property {
            name: name.lexeme.clone(),
            name_token: name,
            comments,
            ty: None,
        })
    }

    fn property_type(&mut self, comments: &[String], after: char) -> ParseResult<PropertyType> {
        let token = self.peek().clone();
        match token.kind {
            k if k.is_scalar() => {
                self.advance();
                Ok(PropertyType::new(token))
            }
            TokenKind::Identifier => {
                self.advance();
                self.sema.reference(&token);
                Ok(PropertyType::new(token))
            }
            TokenKind::List | TokenKind::Map => {
                self.advance();
                self.consume(TokenKind::Less, &format!("Expected '<' after '{}'", token.lexeme), true)?;
                let inner = self.property_type(&[], '<')?;
                self.consume(TokenKind::Greater, "Expected '>' after generic type", true)?;
                Ok(PropertyType {
                    token,
                    generic: Some(Box::new(inner)),
                    declaration: None,
                })
            }
            TokenKind::Type | TokenKind::Enum => {
                self.advance();
                self.inline_declaration(&token, comments)
            }
            _ => Err(self.err_here(&format!("Expected type after '{}'", after), true)),
        }
    }

    // `type X { ... }` used as a property type: the object is hoisted into the
    // flat object list ahead of the declaration that contains it.
    fn inline_declaration(&mut self, keyword: &Token, comments: &[String]) -> ParseResult<PropertyType> {
        let kind = if keyword.kind == TokenKind::Enum { ObjectKind::Enum } else { ObjectKind::Type };
        let name = self
            .consume(TokenKind::Identifier, &format!("Expected identifier after '{}' keyword", kind), true)?
            .clone();
        self.sema.declare(kind, &name)?;
        self.consume(TokenKind::OpenCurly, &format!("Expected block after {} name", kind), true)?;

        let mut properties = Vec::new();
        let parsed = if kind == ObjectKind::Enum {
            self.enum_block(&mut properties)
        } else {
            self.block(&mut properties)
        };
        if let Err(diag) = parsed {
            let in_block = diag.in_block();
            self.diagnostics.push(diag);
            let start = self.pos;
            self.skip_block(in_block, start);
        }

        let id = ObjectId(self.objects.len());
        trace!("hoisting inline {} '{}' as object #{}", kind, name.lexeme, id.0);
        self.objects.push(Object {
            kind,
            name: name.lexeme.clone(),
            name_token: Some(name.clone()),
            comments: comments.to_vec(),
            properties,
        });
        Ok(PropertyType {
            token: name,
            generic: None,
            declaration: Some(id),
        })
    }

    fn comments(&mut self) -> Vec<String> {
        let mut comments = Vec::new();
        while self.check(TokenKind::Comment) {
            comments.push(self.advance().lexeme.clone());
        }
        comments
    }

    /* ── Recovery ────────────────────────────────────────── */

    /// Declaration-level recovery. Outside a block, moves to the declaration's
    /// opening `{` (stopping early at a later declaration keyword), then skips
    /// until brace depth returns to zero. Inside a block, the cursor already
    /// sits at depth one.
    fn skip_block(&mut self, in_block: bool, start: usize) {
        let mut depth = usize::from(in_block);
        if !in_block {
            loop {
                if self.is_at_end() {
                    return;
                }
                let kind = self.peek().kind;
                if kind == TokenKind::OpenCurly {
                    break;
                }
                if kind.starts_declaration() && self.pos > start {
                    return;
                }
                self.advance();
            }
        }
        while !self.is_at_end() {
            match self.advance().kind {
                TokenKind::OpenCurly => depth += 1,
                TokenKind::CloseCurly => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    /// Property-level recovery: stops after a depth-zero `,`, or before the
    /// `}` closing the current block.
    fn skip_property(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            let kind = self.peek().kind;
            match kind {
                TokenKind::Comma if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::CloseCurly if depth == 0 => return,
                TokenKind::Config | TokenKind::Command | TokenKind::Event if depth == 0 => return,
                TokenKind::CloseCurly => depth -= 1,
                TokenKind::OpenCurly => depth += 1,
                _ => {}
            }
            self.advance();
        }
    }

    // Comments directly before `}` or EOF document nothing.
    fn skip_dangling_comments(&mut self) {
        let mut i = self.pos;
        while self.tokens[i].kind == TokenKind::Comment {
            i += 1;
        }
        if i != self.pos && matches!(self.tokens[i].kind, TokenKind::CloseCurly | TokenKind::EOF) {
            self.pos = i;
        }
    }

    /* ── Token utils ─────────────────────────────────────── */

    fn peek_past_comments(&self) -> &Token {
        let mut i = self.pos;
        while self.tokens[i].kind == TokenKind::Comment {
            i += 1;
        }
        &self.tokens[i]
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) && !self.is_at_end() {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, kind: TokenKind, msg: &str, in_block: bool) -> ParseResult<&Token> {
        if self.check(kind) && !self.is_at_end() {
            Ok(self.advance())
        } else {
            Err(self.err_here(msg, in_block))
        }
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::EOF
    }

    fn err_here(&self, msg: &str, in_block: bool) -> Diagnostic {
        Diagnostic::syntax(self.peek(), msg, in_block)
    }
}
