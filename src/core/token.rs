// src/core/token.rs
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    // Punctuation
    OpenCurly,  // {
    CloseCurly, // }
    Colon,      // :
    Comma,      // ,
    Less,       // <
    Greater,    // >

    // Scalar types
    String,
    Bool,
    Int32,
    Int64,
    Float32,
    Float64,

    // Containers
    List,
    Map,

    // Declaration keywords
    Name,
    Version,
    Config,
    Command,
    Event,
    Type,
    Enum,

    // Literals
    Identifier,
    Comment,
    VersionNumber,

    // Special
    EOF,
}

impl TokenKind {
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TokenKind::String
                | TokenKind::Bool
                | TokenKind::Int32
                | TokenKind::Int64
                | TokenKind::Float32
                | TokenKind::Float64
        )
    }

    pub fn is_container(self) -> bool {
        matches!(self, TokenKind::List | TokenKind::Map)
    }

    /// Keywords that open a top-level declaration.
    pub fn starts_declaration(self) -> bool {
        matches!(
            self,
            TokenKind::Config | TokenKind::Command | TokenKind::Event | TokenKind::Type | TokenKind::Enum
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 0-based line index.
    pub line: usize,
    /// 0-based column, counted in characters.
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// Length of the lexeme in characters, as used for underlining.
    pub fn len(&self) -> usize {
        self.lexeme.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.lexeme.is_empty()
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::Colon => ":",
            TokenKind::Comma => ",",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::String => "string",
            TokenKind::Bool => "bool",
            TokenKind::Int32 => "int32",
            TokenKind::Int64 => "int64",
            TokenKind::Float32 => "float32",
            TokenKind::Float64 => "float64",
            TokenKind::List => "list",
            TokenKind::Map => "map",
            TokenKind::Name => "name",
            TokenKind::Version => "version",
            TokenKind::Config => "config",
            TokenKind::Command => "command",
            TokenKind::Event => "event",
            TokenKind::Type => "type",
            TokenKind::Enum => "enum",
            TokenKind::Identifier => "identifier",
            TokenKind::Comment => "comment",
            TokenKind::VersionNumber => "version number",
            TokenKind::EOF => "end of file",
        };
        write!(f, "{}", name)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "Identifier('{}') @{}:{}", self.lexeme, self.line, self.column),
            TokenKind::Comment => write!(f, "Comment(\"{}\") @{}:{}", self.lexeme, self.line, self.column),
            TokenKind::VersionNumber => write!(f, "Version({}) @{}:{}", self.lexeme, self.line, self.column),
            other => write!(f, "{} @{}:{}", other, self.line, self.column),
        }
    }
}
