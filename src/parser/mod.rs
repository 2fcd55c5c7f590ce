//! Parser module for building the syntax tree.
//!
//! This module turns the token stream into an arena-backed tree. Statements
//! and constructs are parsed by plain recursive descent with bounded
//! lookahead; expressions are built in two phases:
//!
//! - Weave construction: operators are chained leftward in source order
//! - Rebalancing: the weave is rotated in place into precedence order
//!
//! Grammar handlers are free functions taking `&mut Parser`, grouped by
//! statements, expressions, types, constructs and container literals.

pub mod constructs;
pub mod containers;
pub mod expr;
pub mod parser;
pub mod rebalance;
pub mod stmt;
pub mod types;
