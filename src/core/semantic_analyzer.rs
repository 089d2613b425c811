// src/core/semantic_analyzer.rs
//! Semantic checks that run alongside and after parsing:
//! - Namespace uniqueness, checked as soon as a declaration name is read
//! - Deferred resolution of type references once the whole file is known
//! - Config singleton: synthesized when the file declares none

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::core::ast::{Object, ObjectId, ObjectKind, PropertyType};
use crate::core::error::{Diagnostic, SemanticErrorKind};
use crate::core::token::Token;

/// The three independent identifier scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Commands,
    Events,
    /// Types and enums share one scope.
    Types,
}

impl Namespace {
    pub fn of(kind: ObjectKind) -> Option<Self> {
        match kind {
            ObjectKind::Command => Some(Namespace::Commands),
            ObjectKind::Event => Some(Namespace::Events),
            ObjectKind::Type | ObjectKind::Enum => Some(Namespace::Types),
            ObjectKind::Config => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SemanticAnalyzer {
    namespaces: HashMap<Namespace, HashMap<String, Token>>,
    references: Vec<Token>,
    config_seen: bool,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a declaration name, failing at `name` if its namespace already has it.
    pub fn declare(&mut self, kind: ObjectKind, name: &Token) -> Result<(), Diagnostic> {
        let Some(ns) = Namespace::of(kind) else { return Ok(()) };
        let scope = self.namespaces.entry(ns).or_default();
        if scope.contains_key(&name.lexeme) {
            return Err(Diagnostic::semantic(
                SemanticErrorKind::DuplicateIdentifier,
                name,
                format!("'{}' already defined", name.lexeme),
            ));
        }
        scope.insert(name.lexeme.clone(), name.clone());
        Ok(())
    }

    /// Claims the config singleton; a second claim fails at `keyword`.
    pub fn declare_config(&mut self, keyword: &Token) -> Result<(), Diagnostic> {
        if self.config_seen {
            return Err(Diagnostic::semantic(
                SemanticErrorKind::MultipleConfig,
                keyword,
                "Only one config object is allowed",
            ));
        }
        self.config_seen = true;
        Ok(())
    }

    pub fn is_declared(&self, ns: Namespace, name: &str) -> bool {
        self.namespaces.get(&ns).map_or(false, |scope| scope.contains_key(name))
    }

    /// Records a type reference for resolution once parsing is done.
    pub fn reference(&mut self, token: &Token) {
        self.references.push(token.clone());
    }

    /// Runs the deferred checks over the finished object list.
    pub fn finish(self, objects: &mut Vec<Object>) -> Vec<Diagnostic> {
        let mut diags = Vec::new();
        let mut reported = HashSet::new();
        for token in &self.references {
            if self.is_declared(Namespace::Types, &token.lexeme) || !reported.insert(token.lexeme.as_str()) {
                continue;
            }
            diags.push(Diagnostic::semantic(
                SemanticErrorKind::UndefinedType,
                token,
                format!("Undefined type '{}'", token.lexeme),
            ));
        }

        link_references(objects);

        if !objects.iter().any(|o| o.kind == ObjectKind::Config) {
            debug!("no config declared; synthesizing an empty one");
            objects.push(Object::empty_config());
        }
        diags
    }
}

/// Binds every `identifier` property type to the Type/Enum object it names.
pub fn link_references(objects: &mut [Object]) {
    let mut by_name: HashMap<String, ObjectId> = HashMap::new();
    for (i, o) in objects.iter().enumerate() {
        if matches!(o.kind, ObjectKind::Type | ObjectKind::Enum) {
            by_name.entry(o.name.clone()).or_insert(ObjectId(i));
        }
    }
    for o in objects.iter_mut() {
        for p in o.properties.iter_mut() {
            if let Some(ty) = p.ty.as_mut() {
                link(ty, &by_name);
            }
        }
    }
}

fn link(ty: &mut PropertyType, by_name: &HashMap<String, ObjectId>) {
    let mut cursor = Some(ty);
    while let Some(t) = cursor {
        if t.is_reference() && t.declaration.is_none() {
            t.declaration = by_name.get(&t.token.lexeme).copied();
        }
        cursor = t.generic.as_deref_mut();
    }
}
