//! Precedence climbing shared by expressions and type expressions.
//!
//! A family of operators describes its table (binding powers, associativity),
//! how to parse the operand a climb starts from and how to fold an operator
//! into a node. [`parse_climb`] and [`climb`] do the rest.

use crate::{
    ast::ast::Node,
    errors::errors::{ContextTag, Reason},
    lexer::tokens::{Lexeme, Token},
    Location,
};

use super::context::ParseContext;

pub trait Operators: Sized {
    /// Tag of the context each climb runs in.
    const CONTEXT: ContextTag;
    /// Reported when an operator has no right-hand operand.
    const MISSING: Reason;

    fn binding_power(lexeme: Lexeme) -> Option<u8>;

    fn left_associative(lexeme: Lexeme) -> bool;

    fn operand(ctx: &ParseContext<'_>) -> Option<Node>;

    fn binary(operator: Lexeme, location: Location, children: Vec<Node>) -> Node;

    /// Consumes the operator at the cursor and builds the node it forms with `left`.
    fn infix(ctx: &ParseContext<'_>, left: Node, operator: Token, power: u8) -> Node {
        fold_binary::<Self>(ctx, left, operator, power)
    }
}

/// Parses an operand and climbs over every operator binding at least `min`.
pub fn parse_climb<G: Operators>(parent: &ParseContext<'_>, min: u8) -> Option<Node> {
    if let Some(missing) = parent.skip_if_too_deep() {
        return Some(missing);
    }

    let ctx = parent.enter_with_precedence(G::CONTEXT, min);

    let Some(left) = G::operand(&ctx) else {
        ctx.backtrack();
        return None;
    };

    Some(climb::<G>(&ctx, left))
}

/// Folds operators into `left` while they bind at least as tightly as the context's minimum.
///
/// Every node built here is located at the first token of `ctx`, which opened
/// at the operand, so a parenthesised operand locates the node at its `(`.
pub fn climb<G: Operators>(ctx: &ParseContext<'_>, mut left: Node) -> Node {
    let min = ctx.precedence().unwrap_or(0);

    while let Some(power) = G::binding_power(ctx.peek_lexeme()) {
        if power < min {
            break;
        }

        left = G::infix(ctx, left, ctx.peek(), power);
    }

    left
}

/// The plain binary case: `left op right`, with the right side climbing from
/// `power + 1` for left-associative operators and from `power` otherwise.
pub fn fold_binary<G: Operators>(
    ctx: &ParseContext<'_>,
    left: Node,
    operator: Token,
    power: u8,
) -> Node {
    ctx.advance();

    let next = if G::left_associative(operator.lexeme) {
        power + 1
    } else {
        power
    };

    let right = parse_climb::<G>(ctx, next);
    let right = ctx.require(right, G::MISSING);

    G::binary(operator.lexeme, ctx.location(), vec![left, right])
}
