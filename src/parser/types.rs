//! Type annotation parsing.
//!
//! Types appear between `<` and `>` after a declared name. A type is one of:
//!
//! - A named type (`int`, `str`, or a user identifier)
//! - A shorthand container (`[]`, `-[]`, `{}`, `{><}`, `*-*`, `*->*`)
//! - A container with element types, e.g. `[int]` or `{str, int}`
//!
//! Any of these may be prefixed with `*` to mark a pointer.

use crate::{
    ast::types::{ContainerKind, TypeExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::parser::Parser;

/// Parses a comma-separated type list up to `end`, which is left for the
/// caller to consume.
pub fn parse_types(parser: &mut Parser, end: TokenKind) -> Result<Vec<TypeExpr>, Error> {
    let mut types = vec![parse_type(parser)?];

    while parser.is(TokenKind::Comma) {
        parser.advance()?;
        types.push(parse_type(parser)?);
    }

    if !parser.is(end) {
        return Err(parser.unexpected());
    }

    Ok(types)
}

pub fn parse_type(parser: &mut Parser) -> Result<TypeExpr, Error> {
    let is_pointer = if parser.is(TokenKind::Multiply) {
        parser.advance()?;
        true
    } else {
        false
    };

    let kind = parser.current_token_kind();

    if let Some(container) = ContainerKind::from_opener(kind) {
        let token = parser.advance()?;
        let closer = container.closer();
        let types = parse_types(parser, closer)?;
        parser.eat(closer)?;

        return Ok(TypeExpr::container(token, is_pointer, container, types));
    }

    if let Some(container) = ContainerKind::from_shorthand(kind) {
        let token = parser.advance()?;
        return Ok(TypeExpr::container(token, is_pointer, container, vec![]));
    }

    if (kind.is_type() && !kind.is_container()) || kind == TokenKind::Var {
        let token = parser.advance()?;
        return Ok(TypeExpr::named(token, is_pointer));
    }

    Err(parser.error(ErrorImpl::InvalidType {
        token: parser.current_token().to_string(),
    }))
}
