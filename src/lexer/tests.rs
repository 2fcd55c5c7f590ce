//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Every catalog spelling and the longest-match priority between them
//! - Keywords and identifiers
//! - Numeric literals (integers, reals, signed)
//! - String literals
//! - Comments
//! - Error cases

use rstest::rstest;

use super::{
    lexer::{tokenize, Lexer},
    tokens::{Groups, TokenKind},
    trie::RESERVED_TRIE,
};
use crate::errors::errors::ErrorKind;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, Some("test.heap".to_string()))
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn rendered(source: &str) -> Vec<String> {
    tokenize(source, Some("test.heap".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.to_string())
        .collect()
}

#[test]
fn test_every_spelling_tokenizes_to_its_kind() {
    for kind in TokenKind::ALL {
        if kind.spelling().is_empty() || kind.is_synthetic() {
            continue;
        }

        let tokens = tokenize(kind.spelling(), None).unwrap();
        assert_eq!(tokens.len(), 2, "{} lexed to {:?}", kind, tokens);
        assert_eq!(tokens[0].kind, *kind, "spelling {:?}", kind.spelling());
        assert_eq!(tokens[0].value, kind.spelling());
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[rstest]
#[case("-", TokenKind::Subtract)]
#[case("--", TokenKind::Decrement)]
#[case("-=", TokenKind::SubtractEq)]
#[case("-[", TokenKind::LArrOpen)]
#[case("-[]", TokenKind::LArrType)]
#[case("-/", TokenKind::Floor)]
#[case("-/=", TokenKind::FloorEq)]
#[case("->", TokenKind::DirEdge)]
#[case("-*", TokenKind::UndirClose)]
#[case("<", TokenKind::LessThan)]
#[case("<=", TokenKind::LessThanEq)]
#[case("<<", TokenKind::ShiftLeft)]
#[case("<<=", TokenKind::ShiftLeftEq)]
#[case("<}", TokenKind::SetClose)]
#[case("<-*", TokenKind::DirClose)]
#[case("<->", TokenKind::Dir2Edge)]
#[case("*", TokenKind::Multiply)]
#[case("**", TokenKind::Exp)]
#[case("**=", TokenKind::ExpEq)]
#[case("*-", TokenKind::UndirOpen)]
#[case("*->", TokenKind::DirOpen)]
#[case("*->*", TokenKind::DirType)]
#[case("*-*", TokenKind::UndirType)]
#[case("*=", TokenKind::MultiplyEq)]
#[case("{", TokenKind::ScopeOpen)]
#[case("{}", TokenKind::MapType)]
#[case("{<", TokenKind::SetOpen)]
#[case("{><}", TokenKind::SetType)]
#[case(":==", TokenKind::CastEqual)]
#[case(":!=", TokenKind::CastNotEqual)]
#[case(":=", TokenKind::CastAssign)]
#[case("&&=", TokenKind::LAndEq)]
#[case("||=", TokenKind::LOrEq)]
#[case("^^=", TokenKind::LXorEq)]
#[case(">>=", TokenKind::ShiftRightEq)]
#[case("`=", TokenKind::RoundEq)]
#[case("??", TokenKind::NullCoalesce)]
#[case("|>", TokenKind::Pipeline)]
#[case("?.", TokenKind::OptChain)]
fn test_longest_match(#[case] source: &str, #[case] expected: TokenKind) {
    assert_eq!(kinds(source), vec![expected, TokenKind::Eof]);
}

#[test]
fn test_arithmetic_scenario() {
    assert_eq!(
        rendered("1 + 2 * 3 ;"),
        vec!["INT_VAL(1)", "ADD", "INT_VAL(2)", "MULTIPLY", "INT_VAL(3)", "EOL", "EOF"]
    );
}

#[test]
fn test_prefix_overlap_splits() {
    assert_eq!(
        kinds("a<-b"),
        vec![
            TokenKind::Var,
            TokenKind::LessThan,
            TokenKind::Subtract,
            TokenKind::Var,
            TokenKind::Eof
        ]
    );
    assert_eq!(
        kinds("{>"),
        vec![TokenKind::ScopeOpen, TokenKind::GreaterThan, TokenKind::Eof]
    );
    assert_eq!(
        kinds(":!"),
        vec![TokenKind::Colon, TokenKind::LNot, TokenKind::Eof]
    );
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("if else loop func class return pass int real contain null true"),
        vec![
            TokenKind::If,
            TokenKind::Else,
            TokenKind::Loop,
            TokenKind::Func,
            TokenKind::Class,
            TokenKind::Return,
            TokenKind::Pass,
            TokenKind::Int,
            TokenKind::Real,
            TokenKind::Container,
            TokenKind::Null,
            TokenKind::True,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    assert_eq!(
        rendered("foo iffy i integer _under camelCase x2"),
        vec![
            "VAR(foo)",
            "VAR(iffy)",
            "VAR(i)",
            "VAR(integer)",
            "VAR(_under)",
            "VAR(camelCase)",
            "VAR(x2)",
            "EOF"
        ]
    );
}

#[test]
fn test_tokenize_numbers() {
    assert_eq!(
        rendered("42 3.14 .5 7."),
        vec!["INT_VAL(42)", "REAL_VAL(3.14)", "REAL_VAL(.5)", "INT_VAL(7)", "PERIOD", "EOF"]
    );
}

#[test]
fn test_negative_numbers_depend_on_context() {
    assert_eq!(
        rendered("x = -1;"),
        vec!["VAR(x)", "ASSIGN", "INT_VAL(-1)", "EOL", "EOF"]
    );
    assert_eq!(
        rendered("x-1"),
        vec!["VAR(x)", "SUBTRACT", "INT_VAL(1)", "EOF"]
    );
    assert_eq!(
        rendered("f(x) -2.5"),
        vec!["VAR(f)", "PAR_OPEN", "VAR(x)", "PAR_CLOSE", "SUBTRACT", "REAL_VAL(2.5)", "EOF"]
    );
    assert_eq!(rendered("-3"), vec!["INT_VAL(-3)", "EOF"]);
}

#[test]
fn test_tokenize_strings() {
    assert_eq!(
        rendered(r#""hello world" 'say "hi"'"#),
        vec!["STR_VAL(hello world)", "STR_VAL(say \"hi\")", "EOF"]
    );
}

#[test]
fn test_strings_are_verbatim() {
    let tokens = tokenize(r#""a\nb // not a comment""#, None).unwrap();
    assert_eq!(tokens[0].value, r"a\nb // not a comment");
}

#[test]
fn test_comments_are_skipped() {
    assert_eq!(
        kinds("a // line comment\n/* block\n * comment */ b"),
        vec![TokenKind::Var, TokenKind::Var, TokenKind::Eof]
    );
    assert_eq!(
        kinds("a / b /= c"),
        vec![
            TokenKind::Var,
            TokenKind::Divide,
            TokenKind::Var,
            TokenKind::DivideEq,
            TokenKind::Var,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_positions_track_lines_and_columns() {
    let tokens = tokenize("a\n  bb = 1;", Some("pos.heap".to_string())).unwrap();

    assert_eq!(tokens[0].span.start.line, 1);
    assert_eq!(tokens[0].span.start.column, 1);
    assert_eq!(tokens[1].span.start.line, 2);
    assert_eq!(tokens[1].span.start.column, 3);
    assert_eq!(tokens[1].span.end.column, 5);
    assert_eq!(tokens[2].span.start.column, 6);
    assert_eq!(tokens[1].span.start.file.as_str(), "pos.heap");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("a", None).unwrap();
    assert_eq!(tokens[0].span.start.file.as_str(), "shell");
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("x = \"never closed;", None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("a /* forever", None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.get_error_name(), "UnterminatedComment");
}

#[test]
fn test_unrecognised_character() {
    let error = tokenize("a = $;", None).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(error.get_error_name(), "UnrecognisedCharacter");
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_eof_repeats_after_end() {
    let mut lexer = Lexer::new("a".chars(), None);

    assert!(!lexer.is_at_end());
    assert_eq!(lexer.next().unwrap().kind, TokenKind::Var);
    assert!(lexer.is_at_end());
    assert_eq!(lexer.next().unwrap().kind, TokenKind::Eof);
    assert_eq!(lexer.next().unwrap().kind, TokenKind::Eof);
}

#[test]
fn test_token_equality_ignores_position() {
    let first = tokenize("x", None).unwrap();
    let second = tokenize("   x", None).unwrap();

    assert_eq!(first[0], second[0]);
    assert_ne!(first[0], tokenize("y", None).unwrap()[0]);
}

#[test]
fn test_trie_lookup() {
    assert_eq!(RESERVED_TRIE.lookup("interface"), Some(TokenKind::Interface));
    assert_eq!(RESERVED_TRIE.lookup("inter"), None);
    assert_eq!(RESERVED_TRIE.lookup("hash"), Some(TokenKind::Hash));
    assert_eq!(RESERVED_TRIE.lookup("+"), None);
}

#[test]
fn test_classification_groups() {
    assert!(TokenKind::Static.is_modifier());
    assert!(TokenKind::Func.is_construct() && TokenKind::Func.is_type());
    assert!(TokenKind::If.is_direct());
    assert!(TokenKind::ArrType.is_container() && TokenKind::ArrType.is_type());
    assert!(TokenKind::AddEq.is_assignment() && TokenKind::AddEq.is_operator());
    assert!(TokenKind::Null.is_literal() && TokenKind::Null.is_type());
    assert!(!TokenKind::Var.is_reserved());
    assert!(TokenKind::UndirOpen.groups().contains(Groups::CNT.with(Groups::OPR)));
}

#[rstest]
#[case(TokenKind::Period, 0)]
#[case(TokenKind::Exp, 4)]
#[case(TokenKind::Multiply, 5)]
#[case(TokenKind::Subtract, 6)]
#[case(TokenKind::LessThanEq, 8)]
#[case(TokenKind::CastNotEqual, 9)]
#[case(TokenKind::Ternary, 16)]
#[case(TokenKind::Pipeline, 18)]
#[case(TokenKind::ShiftLeftEq, 19)]
fn test_precedence_ranks(#[case] kind: TokenKind, #[case] rank: u8) {
    assert_eq!(kind.precedence(), Some(rank));
}

#[test]
fn test_unranked_kinds() {
    assert_eq!(TokenKind::Var.precedence(), None);
    assert_eq!(TokenKind::Assign.precedence(), None);
}
