//! Parser entry point and the list-recovery helpers shared by the handlers.
//!
//! [`parse`] runs the translation unit handler under a root [`ParseContext`]
//! and returns the tree together with every diagnostic that survived
//! backtracking. Malformed input never fails the call; only checkpoint
//! bookkeeping violations do.

use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::ast::Node,
    errors::errors::{ContextTag, Diagnostic, Error, Reason},
    lexer::tokens::{Lexeme, Token},
};

use super::{
    context::{ParseContext, ParseState},
    global::parse_translation_unit,
};

pub type ElementHandler = fn(&ParseContext<'_>) -> Option<Node>;

/// Parses a whole token sequence into a translation unit.
///
/// # Arguments
///
/// * `tokens` - Tokens produced by the lexer, `Eof` included
/// * `file` - Name recorded in the unit and in every diagnostic
///
/// # Returns
///
/// The translation unit and its diagnostics, or the fatal error that aborted the parse.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<(Node, Vec<Diagnostic>), Error> {
    let token_count = tokens.len();
    let state = ParseState::new(Rc::clone(&file), tokens);

    let unit = {
        let ctx = ParseContext::root(&state, ContextTag::TranslationUnit);
        parse_translation_unit(&ctx)
    };

    let diagnostics = state.finish()?;
    debug!(
        file = %file,
        tokens = token_count,
        diagnostics = diagnostics.len(),
        "parsed translation unit"
    );

    Ok((unit, diagnostics))
}

/// Parses `element (, element)* ,? close` after the opening token has been matched.
///
/// A malformed element is reported with `reason` and replaced by a `Missing`
/// node, then the stream is synchronised on the next `,` or `close` so the
/// list keeps its arity.
pub fn parse_delimited(
    ctx: &ParseContext<'_>,
    close: Lexeme,
    reason: Reason,
    element: ElementHandler,
) -> Vec<Node> {
    let mut items = Vec::new();

    while !ctx.match_one(close) {
        let node = element(ctx);
        if !parse_separator(ctx, &mut items, node, close, reason) {
            break;
        }
    }

    items
}

/// Records one list element and consumes what follows it.
///
/// Returns whether another element may follow; `false` once `close` has been
/// matched or the list had to be abandoned.
pub fn parse_separator(
    ctx: &ParseContext<'_>,
    items: &mut Vec<Node>,
    node: Option<Node>,
    close: Lexeme,
    reason: Reason,
) -> bool {
    match node {
        Some(node) => items.push(node),
        None => {
            items.push(ctx.require(None, reason));
            ctx.skip_until(&[Lexeme::Comma, close]);
        }
    }

    if ctx.match_one(Lexeme::Comma) {
        return true;
    }

    if ctx.match_one(close) {
        return false;
    }

    // Junk after a complete element
    let location = ctx.here();
    ctx.skip_until(&[Lexeme::Comma, close]);

    if ctx.match_one(Lexeme::Comma) {
        ctx.emit_at(Reason::Unknown, location);
        return true;
    }

    if ctx.match_one(close) {
        ctx.emit_at(Reason::Unknown, location);
        return false;
    }

    ctx.emit(Reason::MissingEnclosingSymbol);
    false
}
