//! Integration tests for the complete front end.
//!
//! These tests verify that whole programs go from source text through
//! tokenization, weave construction and rebalancing to the expected tree,
//! and that faults surface as structured errors with positions.

use heap_syntax::{
    ast::node::NodeKind,
    errors::errors::{ErrorImpl, ErrorKind},
    lexer::{lexer::tokenize, tokens::TokenKind},
    parse, render_error,
};
use serde_json::{json, Value};

const PROGRAM: &str = r#"
// shapes and a little arithmetic
Shape = interface() => {
    area<func>;
};

Rect = struct(: Shape) => {
    w<real>;
    h<real>;
    area = func() => w * h;
};

Color = enum() => { Red, Green, Custom(255, 0, 0); };

scale<int> = 2;
sizes = [1 => 10 : 2];
names = {<'a', 'b'<};
lookup = {first: 1, second: 2 + 3 * scale};
routes = *-> home, shop; home -> shop, shop <-> home <-*;

loop (i = 0 : i < 10 : i++) => {
    if (i % 2 == 0) => continue;
    total += i * scale;
}

switch (total) => {
    case 0: print('none');
    default: print(total);
}

try { risky(); } catch e<IOError> { print(e.message); }
"#;

#[test]
fn test_parse_full_program() {
    let ast = parse(PROGRAM, Some("shapes.heap".to_string())).unwrap();
    let root = ast.root().unwrap();

    let tags = ast
        .children(root)
        .into_iter()
        .map(|id| ast.kind(id).tag())
        .collect::<Vec<_>>();
    assert_eq!(
        tags,
        vec![
            "Assignment",
            "Assignment",
            "Assignment",
            "Assignment",
            "Assignment",
            "Assignment",
            "Assignment",
            "Assignment",
            "Loop",
            "Switch",
            "Try",
        ]
    );
    assert!(ast.is_consistent());
}

#[test]
fn test_program_json() {
    let ast = parse(PROGRAM, None).unwrap();
    let json = ast.to_json();
    let statements = &json["statements"];

    assert_eq!(json["type"], "Block");
    assert_eq!(statements[1]["value"]["type"], "Struct");
    assert_eq!(statements[1]["value"]["interfaces"][0]["token"], "VAR(Shape)");
    assert_eq!(
        statements[1]["value"]["body"]["statements"][2]["value"]["body"]["statements"][0]
            ["expression"]["token"],
        "MULTIPLY"
    );
    assert_eq!(statements[2]["value"]["instances"][2]["type"], "Call");
    assert_eq!(statements[3]["var"]["type"], "Declare");
    assert_eq!(statements[4]["value"]["type"], "ArrayListRange");
    assert_eq!(statements[5]["value"]["type"], "Set");
    assert_eq!(
        statements[6]["value"]["entries"][1]["value"],
        json!({
            "type": "BinaryOp",
            "token": "ADD",
            "left": { "type": "IntLiteral", "token": "INT_VAL(2)" },
            "right": {
                "type": "BinaryOp",
                "token": "MULTIPLY",
                "left": { "type": "IntLiteral", "token": "INT_VAL(3)" },
                "right": { "type": "Var", "token": "VAR(scale)" },
            },
        })
    );
    assert_eq!(statements[7]["value"]["edges"][1]["doubleEdge"], true);
    assert_eq!(statements[8]["body"]["statements"][1]["token"], "ADD_EQ");
    assert_eq!(statements[9]["cases"][1]["value"], Value::Null);
    assert_eq!(statements[10]["catches"][0]["token"], "CATCH");
}

#[test]
fn test_positions_follow_source_lines() {
    let ast = parse("a = 1;\n\n  b = a + 2;\n", Some("lines.heap".to_string())).unwrap();
    let root = ast.root().unwrap();
    let second = ast.children(root)[1];
    let NodeKind::Assignment { var, .. } = ast.kind(second) else {
        panic!("expected an assignment");
    };

    let start = &ast.token(*var).unwrap().span.start;
    assert_eq!(start.line, 3);
    assert_eq!(start.column, 3);
    assert_eq!(start.file.as_str(), "lines.heap");
}

#[test]
fn test_tokenize_program() {
    let tokens = tokenize(PROGRAM, None).unwrap();

    assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    assert!(tokens.iter().any(|token| token.kind == TokenKind::DirOpen));
    assert!(tokens.iter().any(|token| token.kind == TokenKind::SetClose));
    assert!(tokens.iter().all(|token| token.span.start.file.as_str() == "shell"));
}

#[test]
fn test_lexical_error_through_parse() {
    let error = parse("x = 1;\ny = 'open;\n", Some("bad.heap".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Lexical);
    assert_eq!(
        error.get_internal_error(),
        &ErrorImpl::UnterminatedString { delimiter: '\'' }
    );
    assert_eq!(error.get_position().line, 2);
    assert_eq!(error.get_position().column, 5);
}

#[test]
fn test_syntax_error_is_rendered() {
    let source = "a = 1;\nb = (2 + 3;\n";
    let error = parse(source, Some("main.heap".to_string())).unwrap_err();

    assert_eq!(error.kind(), ErrorKind::Syntax);
    assert_eq!(error.get_error_name(), "ExpectedToken");

    let rendered = render_error(&error, source);
    let lines = rendered.lines().collect::<Vec<_>>();
    assert!(lines[0].starts_with("Error: ExpectedToken"));
    assert_eq!(lines[1], "-> main.heap:2:11");
    assert_eq!(lines[3], "2 | b = (2 + 3;");
    assert_eq!(lines[4], "  | ----------^");
}

#[test]
fn test_error_serializes_as_record() {
    let error = parse("x = $;", None).unwrap_err();
    let record = serde_json::to_value(&error).unwrap();

    assert_eq!(
        record["internal_error"],
        json!({ "UnrecognisedCharacter": { "character": "$" } })
    );
    assert_eq!(record["position"]["column"], 5);
    assert_eq!(record["position"]["file"], "shell");
}
