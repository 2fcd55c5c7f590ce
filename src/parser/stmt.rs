use tracing::trace;

use crate::{
    ast::node::{NodeId, NodeKind},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expression, parse_postfix},
    parser::Parser,
    types::parse_types,
};

/// Parses statements until the current token is one of `terminators`,
/// leaving the terminator unconsumed.
pub fn parse_block(parser: &mut Parser, terminators: &[TokenKind]) -> Result<NodeId, Error> {
    let mut statements = vec![];

    while !parser.is_any(terminators) {
        if parser.is(TokenKind::Eof) {
            return Err(parser.unexpected_detailed("unexpected end of input"));
        }
        statements.push(parse_statement(parser)?);
    }

    Ok(parser.add(NodeKind::Block { statements }, None))
}

/// `{ statements }`. The lexer reads `{}` as a single token, which is
/// accepted here as an empty block.
pub fn parse_braced_block(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.is(TokenKind::MapType) {
        parser.advance()?;
        return Ok(parser.add(NodeKind::Block { statements: vec![] }, None));
    }

    parser.eat(TokenKind::ScopeOpen)?;
    let block = parse_block(parser, &[TokenKind::ScopeClose])?;
    parser.eat(TokenKind::ScopeClose)?;

    Ok(block)
}

/// A directive body: a braced block or a single statement.
pub fn parse_body(parser: &mut Parser) -> Result<NodeId, Error> {
    if parser.is_any(&[TokenKind::ScopeOpen, TokenKind::MapType]) {
        return parse_braced_block(parser);
    }

    let statement = parse_statement(parser)?;
    Ok(parser.add(
        NodeKind::Block {
            statements: vec![statement],
        },
        None,
    ))
}

pub fn parse_statement(parser: &mut Parser) -> Result<NodeId, Error> {
    trace!(token = %parser.current_token(), "parsing statement");

    let statement = match parser.current_token_kind() {
        kind if kind.is_direct() => return parse_directive(parser),
        TokenKind::Return | TokenKind::Defer => {
            let token = parser.advance()?;
            let value = parse_expression(parser, &[TokenKind::Eol], false)?;
            let kind = if token.kind == TokenKind::Return {
                NodeKind::Return { value }
            } else {
                NodeKind::Defer { value }
            };
            parser.add(kind, Some(token))
        }
        TokenKind::Pass | TokenKind::Continue | TokenKind::Break => {
            let token = parser.advance()?;
            let kind = match token.kind {
                TokenKind::Pass => NodeKind::Pass,
                TokenKind::Continue => NodeKind::Continue,
                _ => NodeKind::Break,
            };
            parser.add(kind, Some(token))
        }
        TokenKind::Eol => parser.add(NodeKind::NoOp, None),
        kind if kind == TokenKind::Annotation || kind.is_modifier() => {
            let declaration = parse_declaration(parser, false)?;
            if parser.is_any(&[TokenKind::Assign, TokenKind::CastAssign]) {
                parse_assignment(parser, declaration, &[TokenKind::Eol])?
            } else {
                declaration
            }
        }
        _ => parse_expression(parser, &[TokenKind::Eol], true)?,
    };

    parser.eat(TokenKind::Eol)?;
    Ok(statement)
}

/// Control-flow directives. They own their bodies and take no `;`.
///
/// `else`, `case`, `default` and `catch` only continue a directive, and
/// `select` opens none, so meeting one here is an error.
pub fn parse_directive(parser: &mut Parser) -> Result<NodeId, Error> {
    match parser.current_token_kind() {
        TokenKind::If => parse_if(parser),
        TokenKind::Loop => parse_loop(parser),
        TokenKind::Switch => parse_switch(parser),
        TokenKind::Try => parse_try(parser),
        _ => Err(parser.unexpected()),
    }
}

/// `@? modifier* name (< types >)?`
///
/// With `force_types` the type list is mandatory. Without types or
/// modifiers the name may carry a property or index chain, as in
/// `@obj.field = 1;`, and that target is returned in place of a `Declare`.
pub fn parse_declaration(parser: &mut Parser, force_types: bool) -> Result<NodeId, Error> {
    let annotation = if parser.is(TokenKind::Annotation) {
        Some(parser.advance()?)
    } else {
        None
    };

    let mut modifiers = vec![];
    while parser.current_token_kind().is_modifier() {
        modifiers.push(parser.advance()?);
    }

    let name = parser.eat(TokenKind::Var)?;
    let var = parser.add(NodeKind::Var, Some(name));

    let types = if force_types || parser.is(TokenKind::LessThan) {
        parser.eat(TokenKind::LessThan)?;
        let types = parse_types(parser, TokenKind::GreaterThan)?;
        parser.eat(TokenKind::GreaterThan)?;
        types
    } else {
        let accessors = [TokenKind::Period, TokenKind::OptChain, TokenKind::ArrOpen];
        if modifiers.is_empty() && parser.is_any(&accessors) {
            return parse_postfix(parser, var);
        }
        vec![]
    };

    Ok(parser.add(
        NodeKind::Declare {
            modifiers,
            var,
            types,
        },
        annotation,
    ))
}

/// Consumes `=` or `:=` and the value following it.
pub fn parse_assignment(
    parser: &mut Parser,
    target: NodeId,
    end: &[TokenKind],
) -> Result<NodeId, Error> {
    let token = parser.eat_any(&[TokenKind::Assign, TokenKind::CastAssign])?;
    let cast = token.kind == TokenKind::CastAssign;
    let value = parse_expression(parser, end, false)?;

    Ok(parser.add(
        NodeKind::Assignment {
            var: target,
            value,
            cast,
        },
        Some(token),
    ))
}

/// `else => body`, if present.
fn parse_else(parser: &mut Parser) -> Result<Option<NodeId>, Error> {
    if !parser.is(TokenKind::Else) {
        return Ok(None);
    }

    parser.advance()?;
    parser.eat(TokenKind::Direct)?;
    Ok(Some(parse_body(parser)?))
}

fn parse_condition(parser: &mut Parser) -> Result<NodeId, Error> {
    parser.eat(TokenKind::ParOpen)?;
    let condition = parse_expression(parser, &[TokenKind::ParClose], false)?;
    parser.eat(TokenKind::ParClose)?;

    Ok(condition)
}

/// `if (c) => body (else if (c) => body)* (else => body)?`
pub fn parse_if(parser: &mut Parser) -> Result<NodeId, Error> {
    let if_token = parser.eat(TokenKind::If)?;
    let mut token = if_token.clone();
    let mut branches = vec![];
    let mut otherwise = None;

    loop {
        let condition = parse_condition(parser)?;
        parser.eat(TokenKind::Direct)?;
        let body = parse_body(parser)?;
        branches.push(parser.add(NodeKind::IfBlock { condition, body }, Some(token)));

        if !parser.is(TokenKind::Else) {
            break;
        }

        parser.advance()?;
        if parser.is(TokenKind::If) {
            token = parser.advance()?;
            continue;
        }

        parser.eat(TokenKind::Direct)?;
        otherwise = Some(parse_body(parser)?);
        break;
    }

    Ok(parser.add(
        NodeKind::If {
            branches,
            otherwise,
        },
        Some(if_token),
    ))
}

/// `loop (sections) => body (else => body)?`
///
/// The header holds up to three `:`-separated comma lists. One list is the
/// loop conditions; two are initialisers and conditions; three add steps.
pub fn parse_loop(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Loop)?;
    parser.eat(TokenKind::ParOpen)?;

    let ends = [TokenKind::Comma, TokenKind::Colon, TokenKind::ParClose];
    let mut sections: Vec<Vec<NodeId>> = vec![];
    loop {
        let mut section = vec![];
        while !parser.is_any(&[TokenKind::Colon, TokenKind::ParClose]) {
            section.push(parse_expression(parser, &ends, true)?);
            if parser.is(TokenKind::Comma) {
                parser.advance()?;
            } else {
                break;
            }
        }
        sections.push(section);

        if parser.is(TokenKind::Colon) {
            parser.advance()?;
        } else {
            break;
        }
    }

    if sections.len() > 3 {
        return Err(Error::new(
            ErrorImpl::TooManyLoopSections {
                count: sections.len(),
            },
            token.span.start.clone(),
        ));
    }
    parser.eat(TokenKind::ParClose)?;

    let mut sections = sections.into_iter();
    let (init, conditions, steps) = match sections.len() {
        1 => (vec![], sections.next().unwrap_or_default(), vec![]),
        _ => (
            sections.next().unwrap_or_default(),
            sections.next().unwrap_or_default(),
            sections.next().unwrap_or_default(),
        ),
    };

    parser.eat(TokenKind::Direct)?;
    let body = parse_body(parser)?;
    let otherwise = parse_else(parser)?;

    Ok(parser.add(
        NodeKind::Loop {
            init,
            conditions,
            steps,
            body,
            otherwise,
        },
        Some(token),
    ))
}

/// `switch (e) => { (case v: stmts | default: stmts)* } (else => body)?`
pub fn parse_switch(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Switch)?;
    let subject = parse_condition(parser)?;
    parser.eat(TokenKind::Direct)?;
    parser.eat(TokenKind::ScopeOpen)?;

    let mut cases = vec![];
    while !parser.is(TokenKind::ScopeClose) {
        let case_token = parser.eat_any(&[TokenKind::Case, TokenKind::Default])?;
        let value = if case_token.kind == TokenKind::Case {
            Some(parse_expression(parser, &[TokenKind::Colon], false)?)
        } else {
            None
        };
        parser.eat(TokenKind::Colon)?;

        let body = parse_block(
            parser,
            &[TokenKind::Case, TokenKind::Default, TokenKind::ScopeClose],
        )?;
        cases.push(parser.add(NodeKind::Case { value, body }, Some(case_token)));
    }
    parser.eat(TokenKind::ScopeClose)?;

    let otherwise = parse_else(parser)?;

    Ok(parser.add(
        NodeKind::Switch {
            subject,
            cases,
            otherwise,
        },
        Some(token),
    ))
}

/// `try { } (catch name<types> { })* (else => body)?`
pub fn parse_try(parser: &mut Parser) -> Result<NodeId, Error> {
    let token = parser.eat(TokenKind::Try)?;
    let body = parse_braced_block(parser)?;

    let mut catches = vec![];
    while parser.is(TokenKind::Catch) {
        let catch_token = parser.advance()?;
        let declaration = parse_declaration(parser, true)?;
        let body = parse_braced_block(parser)?;
        catches.push(parser.add(NodeKind::Catch { declaration, body }, Some(catch_token)));
    }

    let otherwise = parse_else(parser)?;

    Ok(parser.add(
        NodeKind::Try {
            body,
            catches,
            otherwise,
        },
        Some(token),
    ))
}
