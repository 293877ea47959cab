#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use tracing::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{Diagnostic, Error},
    lexer::lexer::tokenize_with,
    parser::parser::parse,
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Zero-based line/column pair attached to every token, node and diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(line: u32, column: u32) -> Self {
        Location { line, column }
    }

    pub fn null() -> Self {
        Location::default()
    }

    /// Shifts a location produced by a nested lex of a fragment that starts at `base`.
    pub fn offset_from(self, base: Location) -> Self {
        if self.line == 0 {
            Location::new(base.line, base.column + self.column)
        } else {
            Location::new(base.line + self.line, self.column)
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Front end configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Width of a tab stop when computing columns.
    pub tab_width: u32,
    /// Name reported in diagnostics; `"shell"` when absent.
    pub file: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tab_width: 4,
            file: None,
        }
    }
}

impl Options {
    pub fn with_file(file: impl Into<String>) -> Self {
        Options {
            file: Some(file.into()),
            ..Options::default()
        }
    }

    pub fn file_name(&self) -> String {
        self.file.clone().unwrap_or_else(|| String::from("shell"))
    }
}

/// Result of running the whole front end over one source text.
#[derive(Debug)]
pub struct ParseOutput {
    /// Always a translation unit, even for malformed input.
    pub unit: Node,
    /// Lexical diagnostics followed by syntactic ones, in source order per phase.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Turns "parsed with diagnostics" into a hard failure for drivers that refuse to continue.
    pub fn into_result(self) -> Result<Node, Error> {
        if self.diagnostics.is_empty() {
            Ok(self.unit)
        } else {
            Err(Error::Diagnostics(self.diagnostics))
        }
    }
}

/// Lexes and parses `source`, collecting diagnostics from both phases.
///
/// Only checkpoint bookkeeping violations are returned as `Err`; malformed
/// input always yields a translation unit plus diagnostics.
pub fn parse_source(source: &str, options: &Options) -> Result<ParseOutput, Error> {
    let file = Rc::new(options.file_name());
    let (tokens, mut diagnostics) = tokenize_with(source, options);
    let (unit, parse_diagnostics) = parse(tokens, Rc::clone(&file))?;
    diagnostics.extend(parse_diagnostics);

    debug!(file = %file, diagnostics = diagnostics.len(), "parsed source");

    Ok(ParseOutput { unit, diagnostics })
}
