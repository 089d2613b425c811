// src/core/ast.rs
//! Declaration tree produced by the parser.
//!
//! All objects of one compile live in a single append-only `Vec<Object>`;
//! cross references between declarations are [`ObjectId`] indices into it.

use serde::Serialize;

use crate::core::token::{Token, TokenKind};

/// Header of a CGE file: `name` and `version`, plus the comments above `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub name: String,
    pub comments: Vec<String>,
    pub version: String,
}

/// Index of an object in the compile unit's object list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ObjectId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Config,
    Command,
    Event,
    Type,
    Enum,
}

impl ObjectKind {
    pub fn from_keyword(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Config => Some(ObjectKind::Config),
            TokenKind::Command => Some(ObjectKind::Command),
            TokenKind::Event => Some(ObjectKind::Event),
            TokenKind::Type => Some(ObjectKind::Type),
            TokenKind::Enum => Some(ObjectKind::Enum),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ObjectKind::Config => "config",
            ObjectKind::Command => "command",
            ObjectKind::Event => "event",
            ObjectKind::Type => "type",
            ObjectKind::Enum => "enum",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Object {
    pub kind: ObjectKind,
    /// Empty only for the config singleton.
    pub name: String,
    /// Declaring name token. For config this is the `config` keyword, and
    /// `None` when the config was synthesized.
    pub name_token: Option<Token>,
    pub comments: Vec<String>,
    pub properties: Vec<Property>,
}

impl Object {
    /// The empty config that stands in when a file declares none.
    pub fn empty_config() -> Self {
        Self {
            kind: ObjectKind::Config,
            name: String::new(),
            name_token: None,
            comments: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub name: String,
    pub name_token: Token,
    pub comments: Vec<String>,
    /// `None` for enum values.
    #[serde(rename = "type")]
    pub ty: Option<PropertyType>,
}

/// A property's type: the type token, plus the element type for `list<T>`
/// and `map<T>` (map keys are always strings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyType {
    pub token: Token,
    pub generic: Option<Box<PropertyType>>,
    /// Set for `identifier` types once they are bound to a declared Type/Enum.
    pub declaration: Option<ObjectId>,
}

impl PropertyType {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            generic: None,
            declaration: None,
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    pub fn is_reference(&self) -> bool {
        self.token.kind == TokenKind::Identifier
    }

    /// Walks the chain `list -> map -> ... -> innermost`.
    pub fn chain(&self) -> impl Iterator<Item = &PropertyType> {
        std::iter::successors(Some(self), |t| t.generic.as_deref())
    }

    pub fn innermost(&self) -> &PropertyType {
        self.chain().last().unwrap_or(self)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.generic {
            Some(inner) => write!(f, "{}<{}>", self.token.lexeme, inner),
            None => f.write_str(&self.token.lexeme),
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}: {}", self.name, ty),
            None => f.write_str(&self.name),
        }
    }
}

impl std::fmt::Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in &self.comments {
            writeln!(f, "// {}", c)?;
        }
        if self.name.is_empty() {
            write!(f, "{} {{", self.kind)?;
        } else {
            write!(f, "{} {} {{", self.kind, self.name)?;
        }
        for p in &self.properties {
            write!(f, "\n\t{},", p)?;
        }
        write!(f, "\n}}")
    }
}
