//! Parser implementation for building the syntax tree.
//!
//! This module contains the main Parser struct and the parse entry points.
//! The parser is a bounded-lookahead recursive-descent driver: it holds a
//! single current token plus a short queue of peeked tokens, and pulls
//! tokens from the lexer on demand. Grammar functions live in the sibling
//! modules and take `&mut Parser` as their first argument.

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::Ast,
        node::{NodeId, NodeKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, MAX_LOOKAHEAD},
        tokens::{Token, TokenKind},
    },
    Position,
};

use super::stmt::parse_block;

/// Any character stream the lexer can read from.
pub type CharSource<'a> = Box<dyn Iterator<Item = char> + 'a>;

/// The main parser structure that maintains parsing state.
///
/// This struct owns the lexer, the current token, the lookahead queue and
/// the arena that nodes are added to as they are parsed.
pub struct Parser<'a> {
    /// Token source
    lexer: Lexer<CharSource<'a>>,
    /// The token under the cursor
    current: Token,
    /// Tokens read ahead of `current`, at most `MAX_LOOKAHEAD`
    lookahead: VecDeque<Token>,
    /// Arena receiving every parsed node
    ast: Ast,
}

impl<'a> Parser<'a> {
    /// Creates a new Parser and reads the first token.
    ///
    /// # Arguments
    ///
    /// * `source` - The characters to parse
    /// * `file` - Optional file name used in positions, `"shell"` by default
    ///
    /// # Returns
    ///
    /// The parser, or the lexical error raised by the first token.
    pub fn new(
        source: impl Iterator<Item = char> + 'a,
        file: Option<String>,
    ) -> Result<Self, Error> {
        let mut lexer = Lexer::new(Box::new(source) as CharSource<'a>, file);
        let current = lexer.next()?;

        Ok(Parser {
            lexer,
            current,
            lookahead: VecDeque::with_capacity(MAX_LOOKAHEAD),
            ast: Ast::new(),
        })
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn is_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current.kind)
    }

    /// Returns the token `n` positions after the current one.
    ///
    /// # Arguments
    ///
    /// * `n` - Distance ahead, from 1 up to `MAX_LOOKAHEAD`
    ///
    /// # Returns
    ///
    /// The peeked token, a lexical error from reading it, or
    /// `LookaheadExceeded` when `n` is out of range.
    pub fn peek(&mut self, n: usize) -> Result<&Token, Error> {
        if n == 0 || n > MAX_LOOKAHEAD {
            return Err(self.error(ErrorImpl::LookaheadExceeded { depth: n }));
        }

        while self.lookahead.len() < n {
            let token = self.lexer.next()?;
            self.lookahead.push_back(token);
        }

        Ok(&self.lookahead[n - 1])
    }

    pub fn peek_kind(&mut self, n: usize) -> Result<TokenKind, Error> {
        Ok(self.peek(n)?.kind)
    }

    /// Advances to the next token and returns the previous one.
    pub fn advance(&mut self) -> Result<Token, Error> {
        let next = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lexer.next()?,
        };

        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Consumes the current token if it is of `kind`.
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise an
    /// `ExpectedToken` error at the current position.
    pub fn eat(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.is(kind) {
            self.advance()
        } else {
            Err(self.expected(kind.name()))
        }
    }

    /// Consumes the current token if it is any of `kinds`.
    pub fn eat_any(&mut self, kinds: &[TokenKind]) -> Result<Token, Error> {
        if self.is_any(kinds) {
            self.advance()
        } else {
            let names = kinds.iter().map(|kind| kind.name()).collect::<Vec<_>>();
            Err(self.expected(&names.join(" | ")))
        }
    }

    /// Returns the position of the current token.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    pub fn error(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.get_position())
    }

    pub fn unexpected(&self) -> Error {
        self.error(ErrorImpl::UnexpectedToken {
            token: self.current.to_string(),
        })
    }

    pub fn unexpected_detailed(&self, message: &str) -> Error {
        self.error(ErrorImpl::UnexpectedTokenDetailed {
            token: self.current.to_string(),
            message: String::from(message),
        })
    }

    fn expected(&self, expected: &str) -> Error {
        self.error(ErrorImpl::ExpectedToken {
            expected: String::from(expected),
            found: self.current.to_string(),
        })
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    pub fn ast_mut(&mut self) -> &mut Ast {
        &mut self.ast
    }

    /// Adds a node to the arena, adopting its children.
    pub fn add(&mut self, kind: NodeKind, token: Option<Token>) -> NodeId {
        self.ast.add(kind, token)
    }

    /// Parses statements up to end of input and returns the finished tree,
    /// rooted at the program block.
    pub fn parse_program(mut self) -> Result<Ast, Error> {
        let block = parse_block(&mut self, &[TokenKind::Eof])?;
        self.ast.set_root(block);
        Ok(self.ast)
    }
}

/// Parses a complete program.
///
/// This is the main entry point for parsing. It creates a parser over the
/// characters of `source` and parses statements until end of input.
///
/// # Arguments
///
/// * `source` - Program text
/// * `file` - Optional file name used in positions
///
/// # Returns
///
/// The syntax tree rooted at the program block, or the first lexical or
/// syntax error encountered.
#[instrument(level = "debug", skip(source))]
pub fn parse(source: &str, file: Option<String>) -> Result<Ast, Error> {
    let parser = Parser::new(source.chars(), file)?;
    let ast = parser.parse_program()?;

    debug!(nodes = ast.len(), "parsed program");
    Ok(ast)
}
