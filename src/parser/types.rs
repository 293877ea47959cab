use crate::{
    ast::ast::{Node, TypeKind},
    errors::errors::{ContextTag, Reason},
    lexer::tokens::{Lexeme, Token},
    Location, MK_NODE,
};

use super::{
    context::ParseContext,
    expr::parse_expr,
    lookups::{TypeBindingPower, TYPE_BP_LOOKUP, TYPE_LEFT_ASSOCIATIVE, TYPE_NUD_LOOKUP},
    parser::{parse_delimited, parse_separator},
    pratt::{fold_binary, parse_climb, Operators},
};

pub struct TypeOperators;

impl Operators for TypeOperators {
    const CONTEXT: ContextTag = ContextTag::Type;
    const MISSING: Reason = Reason::MissingType;

    fn binding_power(lexeme: Lexeme) -> Option<u8> {
        TYPE_BP_LOOKUP.get(&lexeme).map(|power| *power as u8)
    }

    fn left_associative(lexeme: Lexeme) -> bool {
        TYPE_LEFT_ASSOCIATIVE.contains(&lexeme)
    }

    fn operand(ctx: &ParseContext<'_>) -> Option<Node> {
        parse_primary_type(ctx)
    }

    fn binary(operator: Lexeme, location: Location, children: Vec<Node>) -> Node {
        MK_NODE!(Type, TypeKind::Binary(operator), location, children)
    }

    fn infix(ctx: &ParseContext<'_>, left: Node, operator: Token, power: u8) -> Node {
        match operator.lexeme {
            Lexeme::OpenBracket => parse_generic_arguments(ctx, left),
            Lexeme::Dot => parse_path_type(ctx, left, operator),
            _ => fold_binary::<Self>(ctx, left, operator, power),
        }
    }
}

pub fn parse_type(ctx: &ParseContext<'_>) -> Option<Node> {
    parse_climb::<TypeOperators>(ctx, TypeBindingPower::Default as u8)
}

pub fn parse_primary_type(ctx: &ParseContext<'_>) -> Option<Node> {
    let handler = TYPE_NUD_LOOKUP.get(&ctx.peek_lexeme())?;
    handler(ctx)
}

pub fn parse_symbol_type(ctx: &ParseContext<'_>) -> Option<Node> {
    let token = ctx.peek();
    ctx.advance();

    let fundamental = token.lexeme == Lexeme::FundamentalType;
    Some(MK_NODE!(
        Type,
        TypeKind::Identifier {
            name: token.text,
            fundamental
        },
        token.location
    ))
}

pub fn parse_infer_type(ctx: &ParseContext<'_>) -> Option<Node> {
    let location = ctx.here();
    ctx.advance();

    Some(MK_NODE!(Type, TypeKind::Infer, location))
}

/// `()`, `(T)` or `(T, ...)`. A single parenthesised type is returned as is.
pub fn parse_tuple_type(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::TypeTuple);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenParen)) {
        return None;
    }

    if ctx.match_one(Lexeme::CloseParen) {
        return Some(MK_NODE!(Type, TypeKind::Tuple, location));
    }

    let first = parse_type(&ctx);
    if first.is_some() && ctx.match_one(Lexeme::CloseParen) {
        return first;
    }

    let mut elements = Vec::new();
    if parse_separator(&ctx, &mut elements, first, Lexeme::CloseParen, Reason::MissingType) {
        elements.extend(parse_delimited(
            &ctx,
            Lexeme::CloseParen,
            Reason::MissingType,
            parse_type,
        ));
    }

    Some(MK_NODE!(Type, TypeKind::Tuple, location, elements))
}

/// `[T]` or `[T; N]`.
pub fn parse_array_type(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::TypeArray);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenBracket)) {
        return None;
    }

    let element = parse_type(&ctx);
    let element = ctx.require(element, Reason::MissingType);

    let size = if ctx.match_one(Lexeme::Semicolon) {
        let size = parse_expr(&ctx);
        ctx.require(size, Reason::MissingExpr)
    } else {
        Node::Empty
    };

    ctx.emit_if_lexeme_not_present(Lexeme::CloseBracket, Reason::MissingEnclosingSymbol);

    Some(MK_NODE!(Type, TypeKind::Array, location, vec![element, size]))
}

/// `fn(T, ...) -> R`; the return type is optional.
pub fn parse_function_type(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::TypeFunction);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Fn)) {
        return None;
    }

    let parameters_location = ctx.here();
    let parameters = if ctx.emit_if_lexeme_not_present(Lexeme::OpenParen, Reason::MissingSymbol) {
        Vec::new()
    } else {
        parse_delimited(&ctx, Lexeme::CloseParen, Reason::MissingType, parse_type)
    };
    let parameters = MK_NODE!(Type, TypeKind::Tuple, parameters_location, parameters);

    let returns = if ctx.match_one(Lexeme::Arrow) {
        let returns = parse_type(&ctx);
        ctx.require(returns, Reason::MissingType)
    } else {
        Node::Empty
    };

    Some(MK_NODE!(
        Type,
        TypeKind::Function,
        location,
        vec![parameters, returns]
    ))
}

fn parse_generic_arguments(parent: &ParseContext<'_>, base: Node) -> Node {
    let ctx = parent.enter(ContextTag::GenericArguments);
    let location = parent.location();
    ctx.advance();

    let mut children = vec![base];
    children.extend(parse_delimited(
        &ctx,
        Lexeme::CloseBracket,
        Reason::MissingType,
        parse_type,
    ));

    MK_NODE!(Type, TypeKind::GenericArguments, location, children)
}

/// `a.B`: the right side is a single type name, so `a.B[T]` applies `T` to `a.B`.
fn parse_path_type(ctx: &ParseContext<'_>, left: Node, operator: Token) -> Node {
    ctx.advance();

    let right = match ctx.peek_lexeme() {
        Lexeme::Identifier | Lexeme::UserType | Lexeme::FundamentalType => parse_symbol_type(ctx),
        _ => None,
    };
    let right = ctx.require(right, Reason::MissingId);

    MK_NODE!(
        Type,
        TypeKind::Binary(operator.lexeme),
        ctx.location(),
        vec![left, right]
    )
}
