use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::ast::{ExprKind, Literal, Node},
    errors::errors::{ContextTag, Reason},
    lexer::{
        lexer::tokenize_with,
        tokens::{Lexeme, Token},
    },
    Location, Options, MK_NODE,
};

use super::{
    context::{ParseContext, ParseState},
    lookups::{BindingPower, BP_LOOKUP, LEFT_ASSOCIATIVE, NUD_LOOKUP, PREFIX_LOOKUP},
    parser::{parse_delimited, parse_separator},
    pratt::{fold_binary, parse_climb, Operators},
};

lazy_static! {
    /// An escape sequence, or a `{...}` placeholder without nested braces.
    static ref STRING_PIECE: Regex =
        Regex::new(r"(\\x[0-9A-Fa-f]{2}|\\.)|\{([^{}\\]*)\}").expect("valid string piece pattern");
}

pub struct ExprOperators;

impl Operators for ExprOperators {
    const CONTEXT: ContextTag = ContextTag::Expression;
    const MISSING: Reason = Reason::MissingExpr;

    fn binding_power(lexeme: Lexeme) -> Option<u8> {
        BP_LOOKUP.get(&lexeme).map(|power| power.level())
    }

    fn left_associative(lexeme: Lexeme) -> bool {
        LEFT_ASSOCIATIVE.contains(&lexeme)
    }

    fn operand(ctx: &ParseContext<'_>) -> Option<Node> {
        parse_unary_expr(ctx)
    }

    fn binary(operator: Lexeme, location: Location, children: Vec<Node>) -> Node {
        MK_NODE!(Expr, ExprKind::Binary(operator), location, children)
    }

    fn infix(ctx: &ParseContext<'_>, left: Node, operator: Token, power: u8) -> Node {
        match operator.lexeme {
            Lexeme::Question => parse_ternary_expr(ctx, left),
            Lexeme::OpenParen => parse_call_expr(ctx, left),
            Lexeme::OpenBracket => parse_index_expr(ctx, left),
            Lexeme::Dot | Lexeme::ColonColon => parse_member_expr(ctx, left, operator),
            _ => fold_binary::<Self>(ctx, left, operator, power),
        }
    }
}

pub fn parse_expr(ctx: &ParseContext<'_>) -> Option<Node> {
    parse_expr_with(ctx, BindingPower::Default.level())
}

/// Parses an expression made of operators binding at least `min`.
pub fn parse_expr_with(ctx: &ParseContext<'_>, min: u8) -> Option<Node> {
    parse_climb::<ExprOperators>(ctx, min)
}

pub fn parse_unary_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let operator = parent.peek();
    if !PREFIX_LOOKUP.contains(&operator.lexeme) {
        return parse_primary_expr(parent);
    }

    let (tag, kind) = match operator.lexeme {
        Lexeme::Try => (ContextTag::Try, ExprKind::Try),
        lexeme => (ContextTag::Prefix, ExprKind::Prefix(lexeme)),
    };

    let ctx = parent.enter(tag);
    ctx.advance();

    let operand = parse_expr_with(&ctx, BindingPower::Prefix.level());
    let operand = ctx.require(operand, Reason::MissingExpr);

    Some(MK_NODE!(Expr, kind, operator.location, vec![operand]))
}

pub fn parse_primary_expr(ctx: &ParseContext<'_>) -> Option<Node> {
    let handler = NUD_LOOKUP.get(&ctx.peek_lexeme())?;
    handler(ctx)
}

pub fn parse_identifier_expr(ctx: &ParseContext<'_>) -> Option<Node> {
    let token = ctx.peek();
    ctx.advance();

    Some(MK_NODE!(Expr, ExprKind::Identifier(token.text), token.location))
}

pub fn parse_literal_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Literal);
    let token = ctx.peek();

    let literal = match token.lexeme {
        Lexeme::Integer => token.text.parse().ok().map(Literal::Integer),
        Lexeme::Float => token.text.parse().ok().map(Literal::Float),
        Lexeme::True => Some(Literal::Bool(true)),
        Lexeme::False => Some(Literal::Bool(false)),
        _ => {
            ctx.backtrack();
            return None;
        }
    };

    let Some(literal) = literal else {
        // Out of range for the literal's type
        ctx.emit(Reason::Unknown);
        ctx.advance();
        return Some(Node::Missing(token.location));
    };

    ctx.advance();
    Some(MK_NODE!(Expr, ExprKind::Literal(literal), token.location))
}

/// `()`, `(expr)` or `(expr, ...)`. A single parenthesised expression is returned as is.
pub fn parse_tuple_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Tuple);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenParen)) {
        return None;
    }

    if ctx.match_one(Lexeme::CloseParen) {
        return Some(MK_NODE!(Expr, ExprKind::Tuple, location));
    }

    let first = parse_expr(&ctx);
    if first.is_some() && ctx.match_one(Lexeme::CloseParen) {
        return first;
    }

    let mut elements = Vec::new();
    if parse_separator(&ctx, &mut elements, first, Lexeme::CloseParen, Reason::MissingExpr) {
        elements.extend(parse_delimited(
            &ctx,
            Lexeme::CloseParen,
            Reason::MissingExpr,
            parse_expr,
        ));
    }

    Some(MK_NODE!(Expr, ExprKind::Tuple, location, elements))
}

pub fn parse_array_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Array);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenBracket)) {
        return None;
    }

    let elements = parse_delimited(&ctx, Lexeme::CloseBracket, Reason::MissingExpr, parse_expr);
    Some(MK_NODE!(Expr, ExprKind::Array, location, elements))
}

pub fn parse_record_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Record);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenCurly)) {
        return None;
    }

    let fields = parse_delimited(&ctx, Lexeme::CloseCurly, Reason::MissingId, parse_record_field);
    Some(MK_NODE!(Expr, ExprKind::Record, location, fields))
}

fn parse_record_field(ctx: &ParseContext<'_>) -> Option<Node> {
    if ctx.peek_lexeme() != Lexeme::Identifier {
        return None;
    }

    let name = ctx.peek();
    ctx.advance();
    ctx.emit_if_lexeme_not_present(Lexeme::Colon, Reason::MissingSymbol);

    let value = parse_expr(ctx);
    let value = ctx.require(value, Reason::MissingExpr);

    Some(MK_NODE!(Expr, ExprKind::RecordField(name.text), name.location, vec![value]))
}

fn parse_ternary_expr(parent: &ParseContext<'_>, condition: Node) -> Node {
    let ctx = parent.enter(ContextTag::Ternary);
    let location = parent.location();
    ctx.advance();

    let then = parse_expr(&ctx);
    let then = ctx.require(then, Reason::MissingExpr);
    ctx.emit_if_lexeme_not_present(Lexeme::Colon, Reason::MissingSymbol);

    // Right associative: `a ? b : c ? d : e` nests in the else branch
    let otherwise = parse_expr_with(&ctx, BindingPower::Ternary.level());
    let otherwise = ctx.require(otherwise, Reason::MissingExpr);

    MK_NODE!(Expr, ExprKind::Ternary, location, vec![condition, then, otherwise])
}

fn parse_call_expr(parent: &ParseContext<'_>, callee: Node) -> Node {
    let ctx = parent.enter(ContextTag::Call);
    let location = parent.location();
    ctx.advance();

    let mut children = vec![callee];
    children.extend(parse_delimited(
        &ctx,
        Lexeme::CloseParen,
        Reason::MissingExpr,
        parse_expr,
    ));

    MK_NODE!(Expr, ExprKind::Call, location, children)
}

fn parse_index_expr(parent: &ParseContext<'_>, target: Node) -> Node {
    let ctx = parent.enter(ContextTag::Index);
    let location = parent.location();
    ctx.advance();

    let index = parse_expr(&ctx);
    let index = ctx.require(index, Reason::MissingExpr);
    ctx.emit_if_lexeme_not_present(Lexeme::CloseBracket, Reason::MissingEnclosingSymbol);

    MK_NODE!(Expr, ExprKind::Index, location, vec![target, index])
}

/// `.` and `::` take a single primary on their right, so postfix operators
/// apply to the whole access: `a.b(c)` calls `a.b`.
fn parse_member_expr(ctx: &ParseContext<'_>, object: Node, operator: Token) -> Node {
    ctx.advance();

    let member = parse_primary_expr(ctx);
    let member = ctx.require(member, Reason::MissingId);

    MK_NODE!(
        Expr,
        ExprKind::Binary(operator.lexeme),
        ctx.location(),
        vec![object, member]
    )
}

/// A string literal. With `{...}` placeholders it becomes an interpolated
/// string whose placeholders are parsed as expressions.
pub fn parse_string_expr(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::String);
    let token = ctx.peek();
    ctx.advance();

    let body = string_body(&token.text);
    let base = Location::new(token.location.line, token.location.column + 1);

    let mut segments = Vec::new();
    let mut placeholders = Vec::new();
    let mut segment = String::new();
    let mut last = 0;

    for captures in STRING_PIECE.captures_iter(body) {
        let Some(piece) = captures.get(0) else {
            continue;
        };
        segment.push_str(&body[last..piece.start()]);
        last = piece.end();

        if let Some(escape) = captures.get(1) {
            segment.push_str(&unescape(escape.as_str()));
        } else if let Some(source) = captures.get(2) {
            segments.push(std::mem::take(&mut segment));
            let column = body[..source.start()].chars().count() as u32;
            let at = Location::new(base.line, base.column + column);
            placeholders.push(parse_placeholder(&ctx, source.as_str(), at));
        }
    }
    segment.push_str(&body[last..]);
    segments.push(segment);

    if placeholders.is_empty() {
        let text = segments.concat();
        return Some(MK_NODE!(
            Expr,
            ExprKind::Literal(Literal::String(text)),
            token.location
        ));
    }

    Some(MK_NODE!(
        Expr,
        ExprKind::String(segments),
        token.location,
        placeholders
    ))
}

/// Lexes and parses one placeholder over its own token stream.
fn parse_placeholder(ctx: &ParseContext<'_>, source: &str, base: Location) -> Node {
    let options = Options {
        file: Some(ctx.file().to_string()),
        ..Options::default()
    };

    let (tokens, diagnostics) = tokenize_with(source, &options);
    let tokens = tokens
        .into_iter()
        .map(|mut token| {
            token.location = token.location.offset_from(base);
            token
        })
        .collect();
    ctx.record(diagnostics.into_iter().map(|mut diagnostic| {
        diagnostic.location = diagnostic.location.offset_from(base);
        diagnostic
    }));

    let state = ParseState::new(ctx.file(), tokens);
    let sub = ctx.subroutine(&state, ContextTag::String);

    let expr = parse_expr(&sub);
    let node = sub.require(expr, Reason::MissingExpr);
    sub.emit_if(!sub.at_end(), Reason::Unknown);

    node
}

/// Strips the quotes; an unterminated literal has only the opening one.
fn string_body(text: &str) -> &str {
    let body = text.strip_prefix('"').unwrap_or(text);

    match body.strip_suffix('"') {
        Some(inner) if inner.chars().rev().take_while(|c| *c == '\\').count() % 2 == 0 => inner,
        _ => body,
    }
}

fn unescape(escape: &str) -> String {
    let mut chars = escape.chars().skip(1);

    match chars.next() {
        Some('n') => String::from("\n"),
        Some('t') => String::from("\t"),
        Some('r') => String::from("\r"),
        Some('0') => String::from("\0"),
        Some('x') if escape.len() == 4 => u8::from_str_radix(&escape[2..], 16)
            .map(|byte| char::from(byte).to_string())
            .unwrap_or_default(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
