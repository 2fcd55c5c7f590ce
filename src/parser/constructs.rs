//! Object constructs: functions, classes, structs, interfaces and enums.
//!
//! Every construct is an expression term introduced by its keyword and is
//! usually bound by an assignment, e.g. `Point = struct() => { x<int>; };`.

use crate::{
    ast::node::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_arguments, parse_expression},
    parser::Parser,
    stmt::{parse_assignment, parse_braced_block, parse_declaration, parse_statement},
};

/// Dispatches on the construct keyword under the cursor. `end` bounds an
/// expression-bodied function.
pub fn parse_construct(parser: &mut Parser, end: &[TokenKind]) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::Func => parse_func(parser, end),
        TokenKind::Class | TokenKind::Struct => parse_class(parser),
        TokenKind::Interface => parse_interface(parser),
        TokenKind::Enum => parse_enum(parser),
        _ => Err(parser.unexpected()),
    }
}

/// `func (params) => { block }` or `func (params) => expr`.
///
/// An expression body becomes a block holding a single `Return`.
pub fn parse_func(parser: &mut Parser, end: &[TokenKind]) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Func)?;
    parser.eat(TokenKind::ParOpen)?;

    let mut params = vec![];
    while !parser.is(TokenKind::ParClose) {
        let declaration = parse_declaration(parser, false)?;
        let param = if parser.is_any(&[TokenKind::Assign, TokenKind::CastAssign]) {
            parse_assignment(parser, declaration, &[TokenKind::Comma, TokenKind::ParClose])?
        } else {
            declaration
        };
        params.push(param);

        if parser.is(TokenKind::Comma) {
            parser.advance()?;
        } else {
            break;
        }
    }
    parser.eat(TokenKind::ParClose)?;
    parser.eat(TokenKind::Direct)?;

    let body = if parser.is_any(&[TokenKind::ScopeOpen, TokenKind::MapType]) {
        parse_braced_block(parser)?
    } else {
        let value = parse_expression(parser, end, false)?;
        let ret = parser.add(NodeKind::Return { value }, None);
        parser.add(
            NodeKind::Block {
                statements: vec![ret],
            },
            None,
        )
    };

    Ok(parser.add(NodeKind::Func { params, body }, Some(token)))
}

/// A comma-separated list of names ending before any of `end`.
fn parse_names(parser: &mut Parser, end: &[TokenKind]) -> Result<Vec<NodeId>, Error> {
    let mut names = vec![];

    while !parser.is_any(end) {
        let name = parser.eat(TokenKind::Var)?;
        names.push(parser.add(NodeKind::Var, Some(name)));

        if parser.is(TokenKind::Comma) {
            parser.advance()?;
        } else {
            break;
        }
    }

    Ok(names)
}

/// `( supers (: interfaces)? ) =>`
fn parse_heritage(parser: &mut Parser) -> Result<(Vec<NodeId>, Vec<NodeId>), Error> {
    parser.eat(TokenKind::ParOpen)?;
    let supers = parse_names(parser, &[TokenKind::Colon, TokenKind::ParClose])?;

    let interfaces = if parser.is(TokenKind::Colon) {
        parser.advance()?;
        parse_names(parser, &[TokenKind::ParClose])?
    } else {
        vec![]
    };

    parser.eat(TokenKind::ParClose)?;
    parser.eat(TokenKind::Direct)?;

    Ok((supers, interfaces))
}

fn parse_class(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat_any(&[TokenKind::Class, TokenKind::Struct])?;
    let (supers, interfaces) = parse_heritage(parser)?;

    let body = parse_class_body(parser)?;

    let kind = if token.kind == TokenKind::Class {
        NodeKind::Class {
            supers,
            interfaces,
            body,
        }
    } else {
        NodeKind::Struct {
            supers,
            interfaces,
            body,
        }
    };
    Ok(parser.add(kind, Some(token)))
}

fn parse_interface(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Interface)?;
    parser.eat(TokenKind::ParOpen)?;
    let supers = parse_names(parser, &[TokenKind::ParClose])?;
    parser.eat(TokenKind::ParClose)?;
    parser.eat(TokenKind::Direct)?;

    let body = parse_class_body(parser)?;

    Ok(parser.add(NodeKind::Interface { supers, body }, Some(token)))
}

/// `enum (supers : interfaces) => { A, B(1, 2); members }`
fn parse_enum(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Enum)?;
    let (supers, interfaces) = parse_heritage(parser)?;
    parser.eat(TokenKind::ScopeOpen)?;

    let mut instances = vec![];
    loop {
        let name = parser.eat(TokenKind::Var)?;
        let var = parser.add(NodeKind::Var, Some(name));

        let instance = if parser.is(TokenKind::ParOpen) {
            let call_token = parser.advance()?;
            let args = parse_arguments(parser, TokenKind::ParClose)?;
            parser.eat(TokenKind::ParClose)?;
            parser.add(NodeKind::Call { target: var, args }, Some(call_token))
        } else {
            var
        };
        instances.push(instance);

        if !parser.is(TokenKind::Comma) {
            break;
        }
        parser.advance()?;
        if parser.is(TokenKind::Eol) {
            break;
        }
    }
    parser.eat(TokenKind::Eol)?;

    let body = parse_class_block(parser)?;
    parser.eat(TokenKind::ScopeClose)?;

    Ok(parser.add(
        NodeKind::Enum {
            supers,
            interfaces,
            instances,
            body,
        },
        Some(token),
    ))
}

/// `{ class block }`, or `{}` for an empty one.
fn parse_class_body(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.is(TokenKind::MapType) {
        parser.advance()?;
        return Ok(parser.add(NodeKind::Block { statements: vec![] }, None));
    }

    parser.eat(TokenKind::ScopeOpen)?;
    let body = parse_class_block(parser)?;
    parser.eat(TokenKind::ScopeClose)?;

    Ok(body)
}

/// Statements up to `}`; each must be an assignment or a typed declaration.
fn parse_class_block(parser: &mut Parser) -> Result<NodeId, Error> {
    let mut statements = vec![];

    while !parser.is(TokenKind::ScopeClose) {
        if parser.is(TokenKind::Eof) {
            return Err(parser.unexpected_detailed("unexpected end of input"));
        }

        let position = parser.get_position();
        let statement = parse_statement(parser)?;

        let allowed = match parser.ast().kind(statement) {
            NodeKind::Assignment { .. } => true,
            NodeKind::Declare { types, .. } => !types.is_empty(),
            _ => false,
        };
        if !allowed {
            return Err(Error::new(
                ErrorImpl::InvalidClassStatement {
                    statement: String::from(parser.ast().kind(statement).tag()),
                },
                position,
            ));
        }

        statements.push(statement);
    }

    Ok(parser.add(NodeKind::Block { statements }, None))
}
