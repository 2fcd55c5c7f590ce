//! Unit tests for the syntax tree arena.

use std::rc::Rc;

use serde_json::json;

use super::{
    ast::Ast,
    node::{NodeId, NodeKind},
};
use crate::{
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

fn span() -> Span {
    let position = Position::new(1, 1, Rc::new(String::from("test.heap")));
    Span {
        start: position.clone(),
        end: position,
    }
}

fn var(ast: &mut Ast, name: &str) -> NodeId {
    ast.add(
        NodeKind::Var,
        Some(Token::new(TokenKind::Var, name.to_string(), span())),
    )
}

fn binary(ast: &mut Ast, kind: TokenKind, left: NodeId, right: NodeId) -> NodeId {
    ast.add(
        NodeKind::BinaryOp { left, right },
        Some(Token::canonical(kind, span())),
    )
}

#[test]
fn test_add_sets_parents() {
    let mut ast = Ast::new();
    let a = var(&mut ast, "a");
    let b = var(&mut ast, "b");
    let add = binary(&mut ast, TokenKind::Add, a, b);

    assert_eq!(ast.parent(a), Some(add));
    assert_eq!(ast.parent(b), Some(add));
    assert_eq!(ast.parent(add), None);
    assert_eq!(ast.children(add), vec![a, b]);
    assert!(ast.is_consistent());
}

#[test]
fn test_set_left_rewires_both_sides() {
    let mut ast = Ast::new();
    let a = var(&mut ast, "a");
    let b = var(&mut ast, "b");
    let c = var(&mut ast, "c");
    let add = binary(&mut ast, TokenKind::Add, a, b);

    ast.set_left(add, c);

    assert_eq!(ast.left(add), Some(c));
    assert_eq!(ast.parent(c), Some(add));
    assert_eq!(ast.right(add), Some(b));
}

#[test]
fn test_reattach_replaces_slot_and_root() {
    let mut ast = Ast::new();
    let a = var(&mut ast, "a");
    let b = var(&mut ast, "b");
    let add = binary(&mut ast, TokenKind::Add, a, b);
    let block = ast.add(NodeKind::Block { statements: vec![add] }, None);
    ast.set_root(block);

    let c = var(&mut ast, "c");
    ast.reattach(add, c);
    assert_eq!(ast.children(block), vec![c]);
    assert_eq!(ast.parent(c), Some(block));

    let other = ast.add(NodeKind::Block { statements: vec![] }, None);
    ast.reattach(block, other);
    assert_eq!(ast.root(), Some(other));
}

#[test]
fn test_replace_child_in_lists() {
    let mut ast = Ast::new();
    let a = var(&mut ast, "a");
    let b = var(&mut ast, "b");
    let list = ast.add(NodeKind::ArrayList { items: vec![a, b] }, None);
    let c = var(&mut ast, "c");

    assert!(ast.replace_child(list, b, c));
    assert_eq!(ast.children(list), vec![a, c]);
    assert!(!ast.replace_child(list, b, c));
}

#[test]
fn test_json_record_shape() {
    let mut ast = Ast::new();
    let a = var(&mut ast, "a");
    let one = ast.add(
        NodeKind::IntLiteral,
        Some(Token::new(TokenKind::IntVal, "1".to_string(), span())),
    );
    let add = binary(&mut ast, TokenKind::Add, a, one);
    let block = ast.add(NodeKind::Block { statements: vec![add] }, None);
    ast.set_root(block);

    assert_eq!(
        ast.to_json(),
        json!({
            "type": "Block",
            "token": null,
            "statements": [{
                "type": "BinaryOp",
                "token": "ADD",
                "left": { "type": "Var", "token": "VAR(a)" },
                "right": { "type": "IntLiteral", "token": "INT_VAL(1)" },
            }],
        })
    );

    let keys = ast.node_to_json(add)
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(keys, vec!["type", "token", "left", "right"]);
}

#[test]
fn test_empty_tree_serializes_to_null() {
    assert_eq!(Ast::new().to_json(), serde_json::Value::Null);
}
