use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Error)]
#[error("{internal_error} at {position}")]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The two fault classes. Both abort the current parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    Lexical,
    Syntax,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. }
            | ErrorImpl::UnterminatedString { .. }
            | ErrorImpl::UnterminatedComment => ErrorKind::Lexical,
            _ => ErrorKind::Syntax,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => "UnrecognisedCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ExpectedToken { .. } => "ExpectedToken",
            ErrorImpl::InvalidClassStatement { .. } => "InvalidClassStatement",
            ErrorImpl::InvalidMapKey { .. } => "InvalidMapKey",
            ErrorImpl::InvalidType { .. } => "InvalidType",
            ErrorImpl::AssignmentNotAllowed { .. } => "AssignmentNotAllowed",
            ErrorImpl::TooManyLoopSections { .. } => "TooManyLoopSections",
            ErrorImpl::LookaheadExceeded { .. } => "LookaheadExceeded",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { delimiter } => ErrorTip::Suggestion(format!(
                "String is never closed, add a closing `{}`",
                delimiter
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Block comment is never closed, add `*/`"))
            }
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::ExpectedToken { expected, found } => {
                ErrorTip::Suggestion(format!("Expected `{}`, found `{}`", expected, found))
            }
            ErrorImpl::InvalidClassStatement { .. } => ErrorTip::Suggestion(String::from(
                "Only assignments and typed declarations may appear in a class body",
            )),
            ErrorImpl::InvalidMapKey { key } => ErrorTip::Suggestion(format!(
                "Key `{}` must be a name, as the first key of this map is a name",
                key
            )),
            ErrorImpl::InvalidType { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot be used as a type", token))
            }
            ErrorImpl::AssignmentNotAllowed { .. } => ErrorTip::Suggestion(String::from(
                "Assignments are statements and cannot appear inside an expression",
            )),
            ErrorImpl::TooManyLoopSections { count } => ErrorTip::Suggestion(format!(
                "A loop header takes at most 3 `:`-separated sections, found {}",
                count
            )),
            ErrorImpl::LookaheadExceeded { .. } => ErrorTip::None,
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum ErrorImpl {
    #[error("unrecognised character: {character:?}")]
    UnrecognisedCharacter { character: char },
    #[error("unterminated string literal, expected {delimiter:?}")]
    UnterminatedString { delimiter: char },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("expected {expected:?}, found {found:?}")]
    ExpectedToken { expected: String, found: String },
    #[error("invalid statement in class body: {statement:?}")]
    InvalidClassStatement { statement: String },
    #[error("invalid map key: {key:?}")]
    InvalidMapKey { key: String },
    #[error("invalid type: {token:?}")]
    InvalidType { token: String },
    #[error("assignment not allowed here: {token:?}")]
    AssignmentNotAllowed { token: String },
    #[error("too many loop sections: {count}")]
    TooManyLoopSections { count: usize },
    #[error("lookahead of {depth} tokens exceeds the parser's limit")]
    LookaheadExceeded { depth: usize },
}
