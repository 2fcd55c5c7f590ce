//! Container literals: lists, ranges, sets, maps and graphs.

use crate::{
    ast::{
        node::{NodeId, NodeKind},
        types::ContainerKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_arguments, parse_expression},
    parser::Parser,
};

/// Parses the container literal starting at the current opener or
/// shorthand token.
pub fn parse_container(parser: &mut Parser) -> Result<NodeId, Error> {
    let kind = parser.current_token_kind();

    if let Some(container) = ContainerKind::from_shorthand(kind) {
        let token = parser.advance()?;
        return Ok(parser.add(empty(container), Some(token)));
    }

    match ContainerKind::from_opener(kind) {
        Some(ContainerKind::ArrayList) | Some(ContainerKind::LinkedList) => parse_list(parser),
        Some(ContainerKind::Set) => {
            let token = parser.advance()?;
            let items = parse_arguments(parser, TokenKind::SetClose)?;
            parser.eat(TokenKind::SetClose)?;
            Ok(parser.add(NodeKind::Set { items }, Some(token)))
        }
        Some(ContainerKind::Map) => parse_map(parser),
        Some(ContainerKind::UndirectedGraph) | Some(ContainerKind::DirectedGraph) => {
            parse_graph(parser)
        }
        None => Err(parser.unexpected()),
    }
}

fn empty(container: ContainerKind) -> NodeKind {
    match container {
        ContainerKind::ArrayList => NodeKind::ArrayList { items: vec![] },
        ContainerKind::LinkedList => NodeKind::LinkedList { items: vec![] },
        ContainerKind::Map => NodeKind::ValueMap { entries: vec![] },
        ContainerKind::Set => NodeKind::Set { items: vec![] },
        ContainerKind::UndirectedGraph => NodeKind::UndirectedGraph {
            nodes: vec![],
            edges: vec![],
        },
        ContainerKind::DirectedGraph => NodeKind::DirectedGraph {
            nodes: vec![],
            edges: vec![],
        },
    }
}

/// `[items]`, `-[items]`, or a range `[start => stop : step]`.
fn parse_list(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let linked = token.kind == TokenKind::LArrOpen;

    if parser.is(TokenKind::ArrClose) {
        parser.advance()?;
        let kind = if linked {
            NodeKind::LinkedList { items: vec![] }
        } else {
            NodeKind::ArrayList { items: vec![] }
        };
        return Ok(parser.add(kind, Some(token)));
    }

    let first = parse_expression(
        parser,
        &[TokenKind::Comma, TokenKind::Direct, TokenKind::ArrClose],
        false,
    )?;

    if parser.is(TokenKind::Direct) {
        parser.advance()?;
        let stop = parse_expression(parser, &[TokenKind::Colon, TokenKind::ArrClose], false)?;
        let step = if parser.is(TokenKind::Colon) {
            parser.advance()?;
            Some(parse_expression(parser, &[TokenKind::ArrClose], false)?)
        } else {
            None
        };
        parser.eat(TokenKind::ArrClose)?;

        let kind = if linked {
            NodeKind::LinkedListRange {
                start: first,
                stop,
                step,
            }
        } else {
            NodeKind::ArrayListRange {
                start: first,
                stop,
                step,
            }
        };
        return Ok(parser.add(kind, Some(token)));
    }

    let mut items = vec![first];
    if parser.is(TokenKind::Comma) {
        parser.advance()?;
        items.extend(parse_arguments(parser, TokenKind::ArrClose)?);
    }
    parser.eat(TokenKind::ArrClose)?;

    let kind = if linked {
        NodeKind::LinkedList { items }
    } else {
        NodeKind::ArrayList { items }
    };
    Ok(parser.add(kind, Some(token)))
}

/// `{key: value, ...}`.
///
/// A map whose first key is a bare name is an object map, and all of its
/// keys must then be bare names. Otherwise keys are arbitrary expressions.
fn parse_map(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::ScopeOpen)?;
    let is_object = parser.is(TokenKind::Var) && parser.peek_kind(1)? == TokenKind::Colon;

    let mut entries = vec![];
    while !parser.is(TokenKind::ScopeClose) {
        let key = if is_object {
            if !parser.is(TokenKind::Var) || parser.peek_kind(1)? != TokenKind::Colon {
                return Err(parser.error(ErrorImpl::InvalidMapKey {
                    key: parser.current_token().to_string(),
                }));
            }
            let name = parser.advance()?;
            parser.add(NodeKind::Var, Some(name))
        } else {
            parse_expression(parser, &[TokenKind::Colon], false)?
        };
        parser.eat(TokenKind::Colon)?;

        let value = parse_expression(parser, &[TokenKind::Comma, TokenKind::ScopeClose], false)?;
        entries.push((key, value));

        if parser.is(TokenKind::Comma) {
            parser.advance()?;
        } else {
            break;
        }
    }
    parser.eat(TokenKind::ScopeClose)?;

    let kind = if is_object {
        NodeKind::ObjectMap { entries }
    } else {
        NodeKind::ValueMap { entries }
    };
    Ok(parser.add(kind, Some(token)))
}

/// `*- nodes ; a <-> b, ... -*` or `*-> nodes ; a -> b, c <-> d <-*`.
///
/// The edge section after `;` is optional.
fn parse_graph(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.advance()?;
    let directed = token.kind == TokenKind::DirOpen;
    let close = if directed {
        TokenKind::DirClose
    } else {
        TokenKind::UndirClose
    };

    let mut nodes = vec![];
    while !parser.is_any(&[TokenKind::Eol, close]) {
        nodes.push(parse_expression(
            parser,
            &[TokenKind::Comma, TokenKind::Eol, close],
            false,
        )?);
        if parser.is(TokenKind::Comma) {
            parser.advance()?;
        } else {
            break;
        }
    }

    let mut edges = vec![];
    if parser.is(TokenKind::Eol) {
        parser.advance()?;
        while !parser.is(close) {
            edges.push(parse_edge(parser, directed, close)?);
            if parser.is(TokenKind::Comma) {
                parser.advance()?;
            } else {
                break;
            }
        }
    }
    parser.eat(close)?;

    let kind = if directed {
        NodeKind::DirectedGraph { nodes, edges }
    } else {
        NodeKind::UndirectedGraph { nodes, edges }
    };
    Ok(parser.add(kind, Some(token)))
}

fn parse_edge(parser: &mut Parser, directed: bool, close: TokenKind) -> Result<NodeId, Error> {
    let connectors = [TokenKind::DirEdge, TokenKind::Dir2Edge];
    let left = parse_expression(parser, &connectors, false)?;

    let edge_token = if directed {
        parser.eat_any(&connectors)?
    } else {
        parser.eat(TokenKind::Dir2Edge)?
    };

    let right = parse_expression(parser, &[TokenKind::Comma, close], false)?;

    let kind = if directed {
        NodeKind::DirectedEdge {
            left,
            right,
            double_edge: edge_token.kind == TokenKind::Dir2Edge,
        }
    } else {
        NodeKind::Edge { left, right }
    };
    Ok(parser.add(kind, Some(edge_token)))
}
