//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Character classification and line/column tracking
//! - Recognition of keywords, fundamental types, identifiers and literals
//! - Longest-match operator lookup over a prefix tree
//! - Comments and whitespace handling
//! - Skip-and-continue reporting of unrecognized characters

pub mod lexer;
pub mod stream;
pub mod tokens;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod tests;
