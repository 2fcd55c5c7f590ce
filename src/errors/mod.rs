//! Error types and error handling for the front end.
//!
//! This module defines the error types produced while lexing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Lexical and syntax fault kinds
//! - Helpful error messages and suggestions

pub mod errors;
