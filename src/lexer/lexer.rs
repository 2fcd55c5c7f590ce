use std::{collections::VecDeque, rc::Rc};

use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_TOKEN,
};

use super::{
    tokens::{Token, TokenKind},
    trie::{TrieNode, RESERVED_TRIE},
};

/// Upper bound on characters (lexer) and tokens (parser) held in a
/// lookahead queue. The longest lexeme, `*->*` and `{><}`, needs four.
pub const MAX_LOOKAHEAD: usize = 4;

/// Pulls tokens on demand from any character stream.
///
/// Characters are consumed through `advance`, which drains the lookahead
/// queue before reading the source, so `peek_n` never reorders input.
pub struct Lexer<I: Iterator<Item = char>> {
    source: I,
    peeked: VecDeque<char>,
    line: u32,
    column: u32,
    file: Rc<String>,
    previous: Option<TokenKind>,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(source: I, file: Option<String>) -> Lexer<I> {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            source,
            peeked: VecDeque::with_capacity(MAX_LOOKAHEAD),
            line: 1,
            column: 1,
            file: file_name,
            previous: None,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    /// True once the character source is exhausted.
    pub fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// Produces the next token. At end of input this keeps returning `EOF`.
    pub fn next(&mut self) -> Result<Token, Error> {
        loop {
            let start = self.position();
            let Some(ch) = self.peek() else {
                return Ok(self.emit(TokenKind::Eof, String::new(), start));
            };

            if ch.is_whitespace() {
                self.advance();
                continue;
            }

            if ch == '/' && self.peek_n(2) == Some('/') {
                self.skip_line_comment();
                continue;
            }

            if ch == '/' && self.peek_n(2) == Some('*') {
                self.skip_block_comment(start)?;
                continue;
            }

            if ch == '"' || ch == '\'' {
                return self.string(ch, start);
            }

            if self.starts_number(ch) {
                return Ok(self.number(start));
            }

            if ch.is_alphabetic() || ch == '_' {
                return Ok(self.identifier(start));
            }

            let Some(kind) = self.operator(ch) else {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedCharacter { character: ch },
                    start,
                ));
            };

            self.advance_n(kind.spelling().chars().count());
            return Ok(self.emit(kind, String::from(kind.spelling()), start));
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.peek_n(1)
    }

    /// Looks `n` characters ahead, 1 being the next unconsumed character.
    fn peek_n(&mut self, n: usize) -> Option<char> {
        debug_assert!((1..=MAX_LOOKAHEAD).contains(&n));

        while self.peeked.len() < n {
            match self.source.next() {
                Some(ch) => self.peeked.push_back(ch),
                None => break,
            }
        }

        self.peeked.get(n - 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = match self.peeked.pop_front() {
            Some(ch) => ch,
            None => self.source.next()?,
        };

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn emit(&mut self, kind: TokenKind, value: String, start: Position) -> Token {
        let token = MK_TOKEN!(
            kind,
            value,
            Span {
                start,
                end: self.position()
            }
        );

        trace!(token = %token, "lexed token");
        self.previous = Some(kind);
        token
    }

    /// A `-` only begins a number where an operand is expected, so `x-1`
    /// stays a subtraction.
    fn sign_allowed(&self) -> bool {
        use TokenKind::*;

        match self.previous {
            None => true,
            Some(kind) => !(kind.is_literal()
                || matches!(
                    kind,
                    Var | This
                        | Super
                        | Print
                        | Size
                        | Hash
                        | ParClose
                        | ArrClose
                        | ScopeClose
                        | SetClose
                        | UndirClose
                        | DirClose
                        | ArrType
                        | LArrType
                        | MapType
                        | SetType
                        | UndirType
                        | DirType
                        | Increment
                        | Decrement
                        | TotalRef
                )),
        }
    }

    fn starts_number(&mut self, ch: char) -> bool {
        let next_is_digit = self.peek_n(2).is_some_and(|c| c.is_ascii_digit());

        ch.is_ascii_digit()
            || (ch == '.' && next_is_digit)
            || (ch == '-' && next_is_digit && self.sign_allowed())
    }

    fn number(&mut self, start: Position) -> Token {
        let mut text = String::new();
        let mut real = false;

        if self.peek() == Some('-') {
            text.push('-');
            self.advance();
        }

        loop {
            match self.peek() {
                Some(ch) if ch.is_ascii_digit() => {
                    text.push(ch);
                    self.advance();
                }
                Some('.') if !real && self.peek_n(2).is_some_and(|c| c.is_ascii_digit()) => {
                    real = true;
                    text.push('.');
                    self.advance();
                }
                _ => break,
            }
        }

        let kind = if real {
            TokenKind::RealVal
        } else {
            TokenKind::IntVal
        };
        self.emit(kind, text, start)
    }

    /// Scans a word while walking the reserved trie in lockstep.
    fn identifier(&mut self, start: Position) -> Token {
        let mut text = String::new();
        let mut node: Option<&TrieNode> = Some(&*RESERVED_TRIE);

        while let Some(ch) = self.peek() {
            if !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            node = node.and_then(|n| n.step(ch));
            text.push(ch);
            self.advance();
        }

        match node.and_then(TrieNode::kind) {
            Some(kind) => self.emit(kind, String::from(kind.spelling()), start),
            None => self.emit(TokenKind::Var, text, start),
        }
    }

    fn string(&mut self, delimiter: char, start: Position) -> Result<Token, Error> {
        self.advance();
        let mut text = String::new();

        loop {
            match self.advance() {
                Some(ch) if ch == delimiter => return Ok(self.emit(TokenKind::StrVal, text, start)),
                Some(ch) => text.push(ch),
                None => {
                    return Err(Error::new(
                        ErrorImpl::UnterminatedString { delimiter },
                        start,
                    ))
                }
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self, start: Position) -> Result<(), Error> {
        self.advance_n(2);

        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(Error::new(ErrorImpl::UnterminatedComment, start)),
            }
        }
    }

    /// Longest-match dispatch over lexemes sharing a leading character.
    /// Branch order within each arm is the priority order.
    fn operator(&mut self, ch: char) -> Option<TokenKind> {
        use TokenKind::*;

        let second = self.peek_n(2);
        let kind = match ch {
            '-' => match second {
                Some('*') => UndirClose,
                Some('-') => Decrement,
                Some('[') if self.peek_n(3) == Some(']') => LArrType,
                Some('[') => LArrOpen,
                Some('>') => DirEdge,
                Some('/') if self.peek_n(3) == Some('=') => FloorEq,
                Some('/') => Floor,
                Some('=') => SubtractEq,
                _ => Subtract,
            },
            '<' => match second {
                Some('<') if self.peek_n(3) == Some('=') => ShiftLeftEq,
                Some('<') => ShiftLeft,
                Some('=') => LessThanEq,
                Some('}') => SetClose,
                Some('-') if self.peek_n(3) == Some('*') => DirClose,
                Some('-') if self.peek_n(3) == Some('>') => Dir2Edge,
                _ => LessThan,
            },
            '*' => match second {
                Some('*') if self.peek_n(3) == Some('=') => ExpEq,
                Some('*') => Exp,
                Some('-') => match (self.peek_n(3), self.peek_n(4)) {
                    (Some('>'), Some('*')) => DirType,
                    (Some('>'), _) => DirOpen,
                    (Some('*'), _) => UndirType,
                    _ => UndirOpen,
                },
                Some('=') => MultiplyEq,
                _ => Multiply,
            },
            '{' => match second {
                Some('}') => MapType,
                Some('<') => SetOpen,
                Some('>') if self.peek_n(3) == Some('<') && self.peek_n(4) == Some('}') => {
                    SetType
                }
                _ => ScopeOpen,
            },
            '[' => match second {
                Some(']') => ArrType,
                _ => ArrOpen,
            },
            '=' => match second {
                Some('=') => Equal,
                Some('>') => Direct,
                _ => Assign,
            },
            ':' => match second {
                Some('=') if self.peek_n(3) == Some('=') => CastEqual,
                Some('=') => CastAssign,
                Some('!') if self.peek_n(3) == Some('=') => CastNotEqual,
                _ => Colon,
            },
            '&' => match second {
                Some('&') if self.peek_n(3) == Some('=') => LAndEq,
                Some('&') => LAnd,
                Some('=') => BAndEq,
                _ => BAnd,
            },
            '|' => match second {
                Some('|') if self.peek_n(3) == Some('=') => LOrEq,
                Some('|') => LOr,
                Some('>') => Pipeline,
                Some('=') => BOrEq,
                _ => BOr,
            },
            '^' => match second {
                Some('^') if self.peek_n(3) == Some('=') => LXorEq,
                Some('^') => LXor,
                Some('=') => BXorEq,
                _ => BXor,
            },
            '!' => match second {
                Some('=') => NotEqual,
                _ => LNot,
            },
            '>' => match second {
                Some('>') if self.peek_n(3) == Some('=') => ShiftRightEq,
                Some('>') => ShiftRight,
                Some('=') => GreaterThanEq,
                _ => GreaterThan,
            },
            '+' => match second {
                Some('+') => Increment,
                Some('=') => AddEq,
                _ => Add,
            },
            '%' => match second {
                Some('=') => ModEq,
                _ => Mod,
            },
            '/' => match second {
                Some('=') => DivideEq,
                _ => Divide,
            },
            '`' => match second {
                Some('=') => RoundEq,
                _ => Round,
            },
            '?' => match second {
                Some('?') => NullCoalesce,
                Some('.') => OptChain,
                _ => Ternary,
            },
            '.' => Period,
            ',' => Comma,
            ';' => Eol,
            ']' => ArrClose,
            '}' => ScopeClose,
            '(' => ParOpen,
            ')' => ParClose,
            '~' => BNot,
            '@' => Annotation,
            '#' => TotalRef,
            _ => return None,
        };

        Some(kind)
    }
}

/// Tokenizes a whole source string, including the trailing `EOF`.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source.chars(), file);
    let mut tokens = vec![];

    loop {
        let token = lexer.next()?;
        let finished = token.kind == TokenKind::Eof;
        tokens.push(token);

        if finished {
            return Ok(tokens);
        }
    }
}
