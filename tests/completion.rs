use cge_compiler::core::completion::{complete, complete_at, CompletionKind, KEYWORDS, TYPES};
use cge_compiler::core::version::CGE_VERSION;
use cge_compiler::compile;
use pretty_assertions::assert_eq;

const SRC: &str = "name a
version 0.4
// A point on the map.
// Integer grid.
type Position { x: int32, y: int32 }
enum Direction { up, down }
event e {
\tat: Pos
}
";

#[test]
fn empty_prefix_offers_everything() {
    let items = complete(&[], CGE_VERSION, "");
    assert_eq!(items.len(), KEYWORDS.len() + TYPES.len() + 7);
}

#[test]
fn keywords_and_snippets_by_prefix() {
    let items = complete(&[], CGE_VERSION, "e");
    let labels: Vec<_> = items.iter().map(|i| (i.label.as_str(), i.kind)).collect();
    assert_eq!(
        labels,
        vec![
            ("event", CompletionKind::Keyword),
            ("enum", CompletionKind::Keyword),
            ("event", CompletionKind::Snippet),
            ("enum", CompletionKind::Snippet),
        ]
    );
    assert_eq!(items[2].insert_text.as_deref(), Some("event ${1:name} {\n\t$0\n}"));
}

#[test]
fn type_names_by_prefix() {
    let labels: Vec<_> = complete(&[], CGE_VERSION, "int")
        .into_iter()
        .map(|i| i.label)
        .collect();
    assert_eq!(labels, vec!["int", "int32", "int64"]);
}

#[test]
fn declared_types_carry_detail_and_docs() {
    let clean = SRC.replace("at: Pos", "at: Position");
    let unit = compile(&clean, CGE_VERSION);
    assert!(!unit.has_errors(), "{:?}", unit.diagnostics);

    let items = complete_at(SRC, 7, 8, &unit.objects, CGE_VERSION);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].label, "Position");
    assert_eq!(items[0].detail.as_deref(), Some("type Position"));
    assert_eq!(items[0].documentation.as_deref(), Some("A point on the map.\nInteger grid."));

    let items = complete_at("\tdir: list<Di", 0, 13, &unit.objects, CGE_VERSION);
    assert_eq!(items[0].detail.as_deref(), Some("enum Direction"));
    assert_eq!(items[0].documentation, None);
}

#[test]
fn version_snippet_has_tab_stops() {
    let snippet = |version: &str| {
        complete(&[], version, "vers")
            .into_iter()
            .find(|i| i.kind == CompletionKind::Snippet)
            .and_then(|i| i.insert_text)
    };
    assert_eq!(snippet(CGE_VERSION).as_deref(), Some("version ${1:0}.${2:4}"));
    assert_eq!(snippet("dev").as_deref(), Some("version ${1:0}.${2:0}"));

    // the dev default must itself be a valid header
    let unit = compile("name a\nversion 0.0\n", "dev");
    assert!(unit.diagnostics.is_empty(), "{:?}", unit.diagnostics);
}
