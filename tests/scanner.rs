use cge_compiler::core::scanner::Scanner;
use cge_compiler::core::token::{Token, TokenKind};
use pretty_assertions::assert_eq;

fn scan(src: &str) -> Vec<Token> {
    Scanner::new(src).scan().expect("scan")
}

fn kinds(src: &str) -> Vec<TokenKind> {
    scan(src).into_iter().map(|t| t.kind).collect()
}

fn comments(src: &str) -> Vec<(String, usize, usize)> {
    scan(src)
        .into_iter()
        .filter(|t| t.kind == TokenKind::Comment)
        .map(|t| (t.lexeme, t.line, t.column))
        .collect()
}

#[test]
fn header_tokens_and_eof_position() {
    let rendered = scan("name demo\nversion 0.4\n")
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    insta::assert_snapshot!(
        rendered,
        @"name @0:0 | Identifier('demo') @0:5 | version @1:0 | Version(0.4) @1:8 | end of file @1:11"
    );
}

#[test]
fn keyword_aliases_keep_their_lexeme() {
    let tokens = scan("int float int64 float64");
    assert_eq!(tokens[0].kind, TokenKind::Int32);
    assert_eq!(tokens[0].lexeme, "int");
    assert_eq!(tokens[1].kind, TokenKind::Float32);
    assert_eq!(tokens[1].lexeme, "float");
    assert_eq!(tokens[2].kind, TokenKind::Int64);
    assert_eq!(tokens[3].kind, TokenKind::Float64);
}

#[test]
fn identifiers_and_case_sensitive_keywords() {
    assert_eq!(
        kinds("player_1 _x Position Event event"),
        vec![
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Event,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn version_numbers_take_up_to_three_parts() {
    for v in ["1", "0.4", "1.2.3", "10.20.30"] {
        let tokens = scan(v);
        assert_eq!(tokens[0].kind, TokenKind::VersionNumber, "{v}");
        assert_eq!(tokens[0].lexeme, v);
    }
}

#[test]
fn version_number_needs_digit_after_dot() {
    let err = Scanner::new("version 1.").scan().unwrap_err();
    assert_eq!(err.message, "Expected digit after '.' in version number");
    assert_eq!((err.line, err.column), (0, 10));
}

#[test]
fn line_comment_is_trimmed_and_positioned_at_text() {
    assert_eq!(comments("  //   hello world  "), vec![("hello world".to_string(), 0, 7)]);
}

#[test]
fn block_comment_yields_one_token_per_nonblank_line() {
    let src = "/* first\n * second\n\n   third */";
    assert_eq!(
        comments(src),
        vec![
            ("first".to_string(), 0, 3),
            ("second".to_string(), 1, 3),
            ("third".to_string(), 3, 3),
        ]
    );
}

#[test]
fn block_comments_nest() {
    let tokens = scan("/* a /* b */ c */ name");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].lexeme, "a  b  c");
    assert_eq!(tokens[1].kind, TokenKind::Name);
    assert_eq!(tokens[1].column, 18);
}

#[test]
fn unterminated_block_comment_points_at_opener() {
    let err = Scanner::new("name x\n/* oops /* inner */").scan().unwrap_err();
    assert_eq!(err.message, "Unterminated block comment");
    assert_eq!((err.line, err.column), (1, 0));
}

#[test]
fn unexpected_characters_are_fatal() {
    let err = Scanner::new("name x\nversion 0.4\n  @").scan().unwrap_err();
    assert_eq!(err.message, "Unexpected character '@'");
    assert_eq!((err.line, err.column), (2, 2));

    let err = Scanner::new("a / b").scan().unwrap_err();
    assert_eq!(err.message, "Unexpected character '/'");
    assert_eq!(err.column, 2);
}

#[test]
fn columns_count_characters_not_bytes() {
    let tokens = scan("/* é */ name");
    assert_eq!(tokens[1].kind, TokenKind::Name);
    assert_eq!(tokens[1].column, 8);
}

#[test]
fn crlf_line_endings() {
    let tokens = scan("name x\r\nversion 0.4\r\n");
    assert_eq!(tokens[2].kind, TokenKind::Version);
    assert_eq!((tokens[2].line, tokens[2].column), (1, 0));
    assert_eq!(tokens[3].lexeme, "0.4");
}
