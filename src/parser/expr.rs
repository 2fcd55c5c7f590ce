use crate::{
    ast::{
        node::{Fixity, NodeId, NodeKind},
        types::ContainerKind,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
};

use super::{
    constructs::parse_construct,
    containers::parse_container,
    parser::Parser,
    rebalance::rebalance,
    stmt::parse_assignment,
    types::parse_types,
};

/// Parses an expression ending before any of `end`.
///
/// Operators are woven leftward as they are read, then the weave is
/// rebalanced and frozen. Assignment tokens turn the expression into an
/// `Assignment` when `allow_assignment` is set; `name<type>` turns a bare
/// name into a declaration; `?` starts a ternary.
pub fn parse_expression(
    parser: &mut Parser,
    end: &[TokenKind],
    allow_assignment: bool,
) -> Result<NodeId, Error> {
    if parser.is_any(end) {
        return Ok(parser.add(NodeKind::NoOp, None));
    }

    let mut weave = parse_term(parser, end)?;

    loop {
        let kind = parser.current_token_kind();
        if end.contains(&kind) {
            break;
        }

        match kind {
            TokenKind::Assign | TokenKind::CastAssign => {
                if !allow_assignment {
                    return Err(parser.error(ErrorImpl::AssignmentNotAllowed {
                        token: parser.current_token().to_string(),
                    }));
                }
                let target = finish(parser, weave);
                return parse_assignment(parser, target, end);
            }
            TokenKind::LessThan if is_bare_name(parser, weave) && starts_type_list(parser)? => {
                let declaration = parse_inline_declaration(parser, weave)?;
                if !parser.is_any(&[TokenKind::Assign, TokenKind::CastAssign]) {
                    return Ok(declaration);
                }
                if !allow_assignment {
                    return Err(parser.error(ErrorImpl::AssignmentNotAllowed {
                        token: parser.current_token().to_string(),
                    }));
                }
                return parse_assignment(parser, declaration, end);
            }
            TokenKind::Ternary => {
                let token = parser.advance()?;
                let center = parse_expression(parser, &[TokenKind::Colon], false)?;
                parser.eat(TokenKind::Colon)?;
                let right = parse_expression(parser, end, false)?;

                weave = parser.add(
                    NodeKind::TernaryOp {
                        left: weave,
                        center,
                        right,
                    },
                    Some(token),
                );
            }
            kind if kind.is_binary_operator() => {
                let token = parser.advance()?;
                let right = parse_term(parser, end)?;

                weave = parser.add(NodeKind::BinaryOp { left: weave, right }, Some(token));
            }
            // Anything else ends the weave; the caller reports it.
            _ => break,
        }
    }

    Ok(finish(parser, weave))
}

/// Rebalances a completed weave and freezes its root.
fn finish(parser: &mut Parser, weave: NodeId) -> NodeId {
    let root = rebalance(parser.ast_mut(), weave);
    parser.ast_mut().freeze(root);
    root
}

fn is_bare_name(parser: &Parser, node: NodeId) -> bool {
    matches!(parser.ast().kind(node), NodeKind::Var) && !parser.ast().is_frozen(node)
}

/// With the cursor on `<`, decides whether a type list follows.
fn starts_type_list(parser: &mut Parser) -> Result<bool, Error> {
    let is_type = |kind: TokenKind| kind.is_type() && !kind.is_literal();

    let first = parser.peek_kind(1)?;
    if is_type(first) {
        return Ok(true);
    }

    if first == TokenKind::Multiply || ContainerKind::from_opener(first).is_some() {
        return Ok(is_type(parser.peek_kind(2)?));
    }

    Ok(false)
}

fn parse_inline_declaration(parser: &mut Parser, var: NodeId) -> Result<NodeId, Error> {
    parser.eat(TokenKind::LessThan)?;
    let types = parse_types(parser, TokenKind::GreaterThan)?;
    parser.eat(TokenKind::GreaterThan)?;

    Ok(parser.add(
        NodeKind::Declare {
            modifiers: vec![],
            var,
            types,
        },
        None,
    ))
}

/// Comma-separated expressions up to `close`, which is left unconsumed.
/// A trailing comma is allowed.
pub fn parse_arguments(parser: &mut Parser, close: TokenKind) -> Result<Vec<NodeId>, Error> {
    let mut args = vec![];

    while !parser.is(close) {
        args.push(parse_expression(parser, &[TokenKind::Comma, close], false)?);
        if parser.is(TokenKind::Comma) {
            parser.advance()?;
        } else {
            break;
        }
    }

    Ok(args)
}

fn literal_kind(kind: TokenKind) -> Option<NodeKind> {
    match kind {
        TokenKind::IntVal => Some(NodeKind::IntLiteral),
        TokenKind::RealVal => Some(NodeKind::RealLiteral),
        TokenKind::StrVal => Some(NodeKind::StringLiteral),
        TokenKind::True | TokenKind::False => Some(NodeKind::BooleanLiteral),
        TokenKind::Null => Some(NodeKind::NullLiteral),
        _ => None,
    }
}

fn is_name(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Var
            | TokenKind::This
            | TokenKind::Super
            | TokenKind::Print
            | TokenKind::Size
            | TokenKind::Hash
    )
}

/// Whether a term can begin with `kind`.
fn starts_term(kind: TokenKind) -> bool {
    kind.is_literal()
        || kind.is_construct()
        || is_name(kind)
        || ContainerKind::from_opener(kind).is_some()
        || ContainerKind::from_shorthand(kind).is_some()
        || matches!(
            kind,
            TokenKind::ParOpen
                | TokenKind::Multiply
                | TokenKind::Subtract
                | TokenKind::Add
                | TokenKind::LNot
                | TokenKind::BNot
                | TokenKind::Increment
                | TokenKind::Decrement
        )
}

pub fn parse_term(parser: &mut Parser, end: &[TokenKind]) -> Result<NodeId, Error> {
    let kind = parser.current_token_kind();

    if let Some(node_kind) = literal_kind(kind) {
        let token = parser.advance()?;
        let literal = parser.add(node_kind, Some(token));
        if kind == TokenKind::StrVal {
            return parse_postfix(parser, literal);
        }
        return Ok(literal);
    }

    if is_name(kind) {
        let token = parser.advance()?;
        let var = parser.add(NodeKind::Var, Some(token));
        return parse_postfix(parser, var);
    }

    match kind {
        TokenKind::ParOpen => {
            parser.advance()?;
            let inner = parse_expression(parser, &[TokenKind::ParClose], false)?;
            parser.eat(TokenKind::ParClose)?;
            parse_postfix(parser, inner)
        }
        TokenKind::Multiply => {
            let star = parser.advance()?;
            let operand = parse_term(parser, end)?;
            let token = Token::new(TokenKind::Point, star.value, star.span);
            Ok(parser.add(
                NodeKind::UnaryOp {
                    operand,
                    fixity: Fixity::Prefix,
                },
                Some(token),
            ))
        }
        TokenKind::Subtract
        | TokenKind::LNot
        | TokenKind::BNot
        | TokenKind::Increment
        | TokenKind::Decrement => {
            let token = parser.advance()?;
            let operand = parse_term(parser, end)?;
            Ok(parser.add(
                NodeKind::UnaryOp {
                    operand,
                    fixity: Fixity::Prefix,
                },
                Some(token),
            ))
        }
        TokenKind::Add => {
            parser.advance()?;
            parse_term(parser, end)
        }
        kind if kind.is_construct() => parse_construct(parser, end),
        kind if ContainerKind::from_opener(kind).is_some()
            || ContainerKind::from_shorthand(kind).is_some() =>
        {
            let container = parse_container(parser)?;
            parse_postfix(parser, container)
        }
        _ => Err(parser.unexpected()),
    }
}

fn postfix_unary(parser: &mut Parser, operand: NodeId, token: Token) -> NodeId {
    parser.add(
        NodeKind::UnaryOp {
            operand,
            fixity: Fixity::Postfix,
        },
        Some(token),
    )
}

/// Applies index, slice, property, call and postfix operators to `node`.
pub fn parse_postfix(parser: &mut Parser, mut node: NodeId) -> Result<NodeId, Error> {
    loop {
        node = match parser.current_token_kind() {
            TokenKind::ArrOpen => parse_index(parser, node)?,
            TokenKind::Period | TokenKind::OptChain => {
                let token = parser.advance()?;
                let opt_chain = token.kind == TokenKind::OptChain;
                let property = if parser.is(TokenKind::ParOpen) {
                    parser.advance()?;
                    let property = parse_expression(parser, &[TokenKind::ParClose], false)?;
                    parser.eat(TokenKind::ParClose)?;
                    property
                } else {
                    let name = parser.eat(TokenKind::Var)?;
                    parser.add(NodeKind::Var, Some(name))
                };

                parser.add(
                    NodeKind::Get {
                        target: node,
                        property,
                        opt_chain,
                    },
                    Some(token),
                )
            }
            TokenKind::ParOpen => {
                let token = parser.advance()?;
                let args = parse_arguments(parser, TokenKind::ParClose)?;
                parser.eat(TokenKind::ParClose)?;

                parser.add(NodeKind::Call { target: node, args }, Some(token))
            }
            TokenKind::Increment | TokenKind::Decrement | TokenKind::TotalRef => {
                let token = parser.advance()?;
                postfix_unary(parser, node, token)
            }
            TokenKind::BAnd if !starts_term(parser.peek_kind(1)?) => {
                let amp = parser.advance()?;
                let token = Token::new(TokenKind::Deref, amp.value, amp.span);
                postfix_unary(parser, node, token)
            }
            TokenKind::Round => {
                let token = parser.advance()?;
                let kind = parser.current_token_kind();

                if let Some(node_kind) = literal_kind(kind).or(is_name(kind).then_some(NodeKind::Var)) {
                    let places_token = parser.advance()?;
                    let places = parser.add(node_kind, Some(places_token));
                    let round = parser.add(
                        NodeKind::BinaryOp {
                            left: node,
                            right: places,
                        },
                        Some(token),
                    );
                    parser.ast_mut().freeze(round);
                    round
                } else {
                    postfix_unary(parser, node, token)
                }
            }
            _ => return Ok(node),
        };
    }
}

/// `target[i]`, `target[a:b]` or `target[a:b:c]`.
fn parse_index(parser: &mut Parser, target: NodeId) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::ArrOpen)?;
    let ends = [TokenKind::Colon, TokenKind::ArrClose];
    let first = parse_expression(parser, &ends, false)?;

    if !parser.is(TokenKind::Colon) {
        parser.eat(TokenKind::ArrClose)?;
        return Ok(parser.add(
            NodeKind::Index {
                target,
                index: first,
            },
            Some(token),
        ));
    }

    parser.advance()?;
    let stop = parse_expression(parser, &ends, false)?;
    let step = if parser.is(TokenKind::Colon) {
        parser.advance()?;
        Some(parse_expression(parser, &[TokenKind::ArrClose], false)?)
    } else {
        None
    };
    parser.eat(TokenKind::ArrClose)?;

    Ok(parser.add(
        NodeKind::Slice {
            target,
            start: first,
            stop,
            step,
        },
        Some(token),
    ))
}
