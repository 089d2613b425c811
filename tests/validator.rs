use cge_compiler::core::ast::{ObjectId, ObjectKind};
use cge_compiler::core::error::SemanticErrorKind;
use cge_compiler::core::version::CGE_VERSION;
use cge_compiler::{compile, CompileUnit};
use pretty_assertions::assert_eq;

fn unit(body: &str) -> CompileUnit {
    compile(&format!("name a\nversion 0.4\n{}", body), CGE_VERSION)
}

fn semantic(unit: &CompileUnit) -> Vec<(SemanticErrorKind, String, usize, usize)> {
    unit.diagnostics
        .iter()
        .filter_map(|d| d.semantic_kind().map(|k| (k, d.message().to_string(), d.line(), d.column())))
        .collect()
}

#[test]
fn namespaces_do_not_collide() {
    let u = unit("command move { a: bool }\nevent move { a: bool }\ntype move { a: bool }");
    assert!(!u.has_errors(), "{:?}", u.diagnostics);
    assert_eq!(u.objects.len(), 4);
}

#[test]
fn types_and_enums_share_a_namespace() {
    let u = unit("type X { a: bool }\nenum X { a }");
    assert_eq!(
        semantic(&u),
        vec![(SemanticErrorKind::DuplicateIdentifier, "'X' already defined".to_string(), 3, 5)]
    );
    assert_eq!(u.declared_types().count(), 1);
}

#[test]
fn duplicate_event_names() {
    let u = unit("event hit { a: bool }\nevent hit { b: bool }\nevent miss { c: bool }");
    assert_eq!(
        semantic(&u),
        vec![(SemanticErrorKind::DuplicateIdentifier, "'hit' already defined".to_string(), 3, 6)]
    );
    let names: Vec<_> = u.objects.iter().map(|o| o.name.as_str()).collect();
    assert_eq!(names, vec!["hit", "miss", ""]);
}

#[test]
fn inline_type_names_are_checked_too() {
    let u = unit("type P { a: bool }\nevent e { p: type P { b: bool } }");
    assert_eq!(semantic(&u)[0].1, "'P' already defined");
}

#[test]
fn only_one_config() {
    let u = unit("config { a: int32 }\nconfig { b: bool }");
    assert_eq!(
        semantic(&u),
        vec![(SemanticErrorKind::MultipleConfig, "Only one config object is allowed".to_string(), 3, 0)]
    );
    let config = u.config().unwrap();
    assert_eq!(config.properties[0].name, "a");
    assert_eq!(u.objects.iter().filter(|o| o.kind == ObjectKind::Config).count(), 1);
}

#[test]
fn undefined_types_are_reported_once_per_name() {
    let u = unit("event e {\n\ta: Foo,\n\tb: list<Foo>,\n\tc: map<Bar>,\n}");
    assert_eq!(
        semantic(&u),
        vec![
            (SemanticErrorKind::UndefinedType, "Undefined type 'Foo'".to_string(), 3, 4),
            (SemanticErrorKind::UndefinedType, "Undefined type 'Bar'".to_string(), 5, 8),
        ]
    );
}

#[test]
fn forward_references_resolve() {
    let u = unit("event e { t: Later, d: Dir }\ntype Later { a: bool }\nenum Dir { up }");
    assert!(!u.has_errors(), "{:?}", u.diagnostics);
    let e = &u.objects[0];
    assert_eq!(e.property("t").unwrap().ty.as_ref().unwrap().declaration, Some(ObjectId(1)));
    assert_eq!(e.property("d").unwrap().ty.as_ref().unwrap().declaration, Some(ObjectId(2)));
}

#[test]
fn commands_and_events_are_not_types() {
    let u = unit("command Foo { a: bool }\nevent Bar { a: bool }\ntype T { f: Foo, b: Bar }");
    let kinds: Vec<_> = semantic(&u).into_iter().map(|(k, m, _, _)| (k, m)).collect();
    assert_eq!(
        kinds,
        vec![
            (SemanticErrorKind::UndefinedType, "Undefined type 'Foo'".to_string()),
            (SemanticErrorKind::UndefinedType, "Undefined type 'Bar'".to_string()),
        ]
    );
}

#[test]
fn duplicate_property_names_are_accepted() {
    let u = unit("event e { a: bool, a: int32 }");
    assert!(!u.has_errors());
    assert_eq!(u.objects[0].properties.len(), 2);
}

#[test]
fn config_may_reference_types() {
    let u = unit("config { mode: Mode }\nenum Mode { easy, hard }");
    assert!(!u.has_errors());
    let mode = u.config().unwrap().property("mode").unwrap().ty.as_ref().unwrap();
    assert_eq!(u.object(mode.declaration.unwrap()).unwrap().name, "Mode");
}
