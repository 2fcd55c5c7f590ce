//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens for parsing. It handles:
//!
//! - The lexeme catalog: kinds, spellings, classification groups, precedence
//! - Reserved-word recognition through a prefix trie
//! - Longest-match dispatch over overlapping multi-character operators
//! - Token position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
pub mod trie;

#[cfg(test)]
mod tests;
