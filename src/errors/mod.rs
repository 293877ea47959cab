//! Diagnostics and error handling for the front end.
//!
//! This module defines what the lexer and parser report. It includes:
//!
//! - Error context tags and reason codes for user-facing diagnostics
//! - Message rendering as a pure function of `(context, reason)`
//! - The per-context diagnostic accumulator
//! - Fatal errors that abort a run

pub mod collector;
pub mod errors;

#[cfg(test)]
mod tests;
