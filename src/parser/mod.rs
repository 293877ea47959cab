//! Parser module for building the syntax tree.
//!
//! This module turns a token sequence into a translation unit. Every grammar
//! handler receives a [`context::ParseContext`], which scopes a token stream
//! checkpoint and the diagnostics emitted under it:
//!
//! - Declarations, statements and top-level items use recursive descent
//! - Expressions and type expressions share one precedence climb (`pratt`)
//! - Malformed input is recovered from by synchronising on delimiters and
//!   inserting `Missing` nodes, never by aborting the parse
//!
//! Operator tables and handler dispatch tables live in `lookups`.

pub mod context;
pub mod decl;
pub mod expr;
pub mod global;
pub mod lookups;
pub mod parser;
pub mod pratt;
pub mod stmt;
pub mod stream;
pub mod types;
