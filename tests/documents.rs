use cge_compiler::core::completion::CompletionKind;
use cge_compiler::core::documents::{ContentChange, DocumentError, DocumentStore, Position, Range};
use cge_compiler::core::error::Severity;
use pretty_assertions::assert_eq;

const GOOD: &str = "name a\nversion 0.4\ntype Point { x: int32 }\nevent e {\n\tp: Po\n}\n";

fn range(sl: usize, sc: usize, el: usize, ec: usize) -> Range {
    Range {
        start: Position::new(sl, sc),
        end: Position::new(el, ec),
    }
}

#[test]
fn open_reports_ranges_and_severity() {
    let store = DocumentStore::default();
    store.open("file:///a.cge", "name a\nversion 0.4\nevent e { a: Foo }");
    let diags = store.diagnostics("file:///a.cge").unwrap();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "Undefined type 'Foo'");
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].range, range(2, 13, 2, 16));
}

#[test]
fn full_and_ranged_changes() {
    let store = DocumentStore::default();
    let uri = "file:///b.cge";
    store.open(uri, "name a\nversion 0.4\nevent e { a: Foo }");

    store
        .change(uri, &[ContentChange::ranged(range(2, 13, 2, 16), "bool")])
        .unwrap();
    assert_eq!(store.text(uri).unwrap(), "name a\nversion 0.4\nevent e { a: bool }");
    assert!(store.diagnostics(uri).unwrap().is_empty());

    store.change(uri, &[ContentChange::full("name a\nversion 9.9\n")]).unwrap();
    let diags = store.diagnostics(uri).unwrap();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Warning);
}

#[test]
fn completions_keep_last_good_declarations() {
    let store = DocumentStore::default();
    let uri = "file:///c.cge";
    store.open(uri, GOOD);
    // the unresolved `Po` is an error, so nothing is known yet
    assert!(store.completions(uri, Position::new(4, 6)).unwrap().is_empty());

    store
        .change(uri, &[ContentChange::ranged(range(4, 4, 4, 6), "Point")])
        .unwrap();
    assert!(store.diagnostics(uri).unwrap().is_empty());

    // break the file again; `Point` is still offered from the last good compile
    store
        .change(uri, &[ContentChange::ranged(range(4, 4, 4, 9), "Po")])
        .unwrap();
    let items = store.completions(uri, Position::new(4, 6)).unwrap();
    let labels: Vec<_> = items.iter().map(|i| (i.label.as_str(), i.kind)).collect();
    assert_eq!(labels, vec![("Point", CompletionKind::Reference)]);
    assert_eq!(items[0].detail.as_deref(), Some("type Point"));
}

#[test]
fn close_forgets_the_document() {
    let store = DocumentStore::default();
    store.open("file:///d.cge", GOOD);
    assert!(store.is_open("file:///d.cge"));
    assert!(store.close("file:///d.cge"));
    assert!(!store.close("file:///d.cge"));
    assert!(store.diagnostics("file:///d.cge").is_none());
    assert_eq!(
        store.change("file:///d.cge", &[ContentChange::full("")]),
        Err(DocumentError::NotOpen("file:///d.cge".to_string()))
    );
}

#[test]
fn concurrent_documents() {
    let store = DocumentStore::default();
    std::thread::scope(|s| {
        for i in 0..8 {
            let store = &store;
            s.spawn(move || {
                let uri = format!("file:///doc{}.cge", i);
                store.open(&uri, "name a\nversion 0.4\n");
                for n in 0..20 {
                    let text = format!("name a\nversion 0.4\nevent e{} {{ a: int32 }}\n", n);
                    store.change(&uri, &[ContentChange::full(text)]).unwrap();
                    let _ = store.diagnostics(&uri);
                }
            });
        }
    });
    for i in 0..8 {
        let uri = format!("file:///doc{}.cge", i);
        assert_eq!(store.text(&uri).unwrap(), "name a\nversion 0.4\nevent e19 { a: int32 }\n");
        assert!(store.diagnostics(&uri).unwrap().is_empty());
    }
}
