//! Completion candidates for editor integrations.

use serde::Serialize;

use crate::core::ast::{Object, ObjectKind};
use crate::core::version::DEV_VERSION;

pub const KEYWORDS: &[&str] = &["name", "version", "config", "command", "event", "type", "enum"];

pub const TYPES: &[&str] = &[
    "string", "bool", "int", "int32", "int64", "float", "float32", "float64", "list", "map",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Keyword,
    Type,
    /// A type or enum declared in the document.
    Reference,
    Snippet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: Option<String>,
    pub documentation: Option<String>,
    pub insert_text: Option<String>,
}

impl CompletionItem {
    fn simple(label: &str, kind: CompletionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            detail: None,
            documentation: None,
            insert_text: None,
        }
    }

    fn snippet(label: &str, detail: &str, insert_text: String) -> Self {
        Self {
            label: label.to_string(),
            kind: CompletionKind::Snippet,
            detail: Some(detail.to_string()),
            documentation: None,
            insert_text: Some(insert_text),
        }
    }
}

/// The word being typed: the text of `line` before `character` (in chars)
/// after the last space, `<`, `>`, `:` or `,`.
pub fn prefix_at(line: &str, character: usize) -> &str {
    let end = line
        .char_indices()
        .nth(character)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let head = &line[..end];
    match head.rfind([' ', '\t', '<', '>', ':', ',']) {
        Some(i) => &head[i + 1..],
        None => head,
    }
}

/// Every candidate whose label starts with `prefix`.
pub fn complete(objects: &[Object], compiler_version: &str, prefix: &str) -> Vec<CompletionItem> {
    let mut items: Vec<CompletionItem> = KEYWORDS
        .iter()
        .map(|k| CompletionItem::simple(k, CompletionKind::Keyword))
        .chain(TYPES.iter().map(|t| CompletionItem::simple(t, CompletionKind::Type)))
        .collect();

    for o in objects.iter().filter(|o| matches!(o.kind, ObjectKind::Type | ObjectKind::Enum)) {
        items.push(CompletionItem {
            label: o.name.clone(),
            kind: CompletionKind::Reference,
            detail: Some(format!("{} {}", o.kind, o.name)),
            documentation: (!o.comments.is_empty()).then(|| o.comments.join("\n")),
            insert_text: None,
        });
    }

    items.extend(snippets(compiler_version));
    items.retain(|item| item.label.starts_with(prefix));
    items
}

/// Completion at a 0-based position of `source`.
pub fn complete_at(
    source: &str,
    line: usize,
    character: usize,
    objects: &[Object],
    compiler_version: &str,
) -> Vec<CompletionItem> {
    let text = source.lines().nth(line).unwrap_or("");
    complete(objects, compiler_version, prefix_at(text, character))
}

fn snippets(compiler_version: &str) -> Vec<CompletionItem> {
    let block = |kw: &str| format!("{} ${{1:name}} {{\n\t$0\n}}", kw);
    vec![
        CompletionItem::snippet("config", "config block", "config {\n\t$0\n}".to_string()),
        CompletionItem::snippet("event", "event declaration", block("event")),
        CompletionItem::snippet("command", "command declaration", block("command")),
        CompletionItem::snippet("type", "type declaration", block("type")),
        CompletionItem::snippet("enum", "enum declaration", block("enum")),
        CompletionItem::snippet("name", "game name", "name ${1:game}".to_string()),
        CompletionItem::snippet("version", "language version", version_snippet(compiler_version)),
    ]
}

// `dev` is not a parsable version number, so it gets a neutral default.
fn version_snippet(compiler_version: &str) -> String {
    if compiler_version == DEV_VERSION {
        return "version ${1:0}.${2:0}".to_string();
    }
    let mut parts = compiler_version.split('.');
    let major = parts.next().unwrap_or("0");
    let minor = parts.next().unwrap_or("0");
    format!("version ${{1:{}}}.${{2:{}}}", major, minor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_splits_on_separators() {
        assert_eq!(prefix_at("\tpos: li", 8), "li");
        assert_eq!(prefix_at("\tmoves: list<Dir", 16), "Dir");
        assert_eq!(prefix_at("ev", 2), "ev");
        assert_eq!(prefix_at("a: map<b", 3), "");
    }

    #[test]
    fn prefix_past_end_of_line_uses_whole_line() {
        assert_eq!(prefix_at("type", 40), "type");
    }

    #[test]
    fn version_snippet_uses_compiler_version() {
        let items = complete(&[], "0.4", "vers");
        let snippet = items.iter().find(|i| i.kind == CompletionKind::Snippet).unwrap();
        assert_eq!(snippet.insert_text.as_deref(), Some("version ${1:0}.${2:4}"));
    }
}
