use crate::{
    ast::ast::{DeclKind, Node},
    errors::errors::{ContextTag, Reason},
    lexer::tokens::Lexeme,
    MK_NODE,
};

use super::{context::ParseContext, parser::parse_delimited, types::parse_type};

/// A binding: a tuple pattern, else a single name.
pub fn parse_decl(ctx: &ParseContext<'_>) -> Option<Node> {
    if let Some(missing) = ctx.skip_if_too_deep() {
        return Some(missing);
    }

    parse_tuple_decl(ctx).or_else(|| parse_identifier_decl(ctx))
}

/// `(decl, ...)`; malformed elements become `Missing` so the arity survives.
pub fn parse_tuple_decl(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::DeclTuple);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenParen)) {
        return None;
    }

    let elements = parse_delimited(&ctx, Lexeme::CloseParen, Reason::MissingDecl, parse_decl);
    Some(MK_NODE!(Decl, DeclKind::Tuple, location, elements))
}

/// `mut? (name | _) (: type)?`
pub fn parse_identifier_decl(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::DeclIdentifier);
    let location = ctx.here();
    let mutable = ctx.match_one(Lexeme::Mut);

    let name = ctx.peek();
    if ctx.backtrack_if(!ctx.match_any(&[Lexeme::Identifier, Lexeme::Anonymous])) {
        return None;
    }

    let annotation = if ctx.match_one(Lexeme::Colon) {
        let annotation = parse_type(&ctx);
        ctx.require(annotation, Reason::MissingType)
    } else {
        Node::Empty
    };

    Some(MK_NODE!(
        Decl,
        DeclKind::Identifier {
            name: name.text,
            mutable
        },
        location,
        vec![annotation]
    ))
}

/// `[T, U: Bound, ...]` after a function name.
pub fn parse_generic_parameters(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::GenericParameters);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenBracket)) {
        return None;
    }

    let parameters = parse_delimited(
        &ctx,
        Lexeme::CloseBracket,
        Reason::MissingId,
        parse_generic_parameter,
    );
    Some(MK_NODE!(
        Decl,
        DeclKind::GenericParameters,
        location,
        parameters
    ))
}

fn parse_generic_parameter(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::GenericParameter);
    let name = ctx.peek();
    if ctx.backtrack_if(!ctx.match_any(&[Lexeme::UserType, Lexeme::Identifier])) {
        return None;
    }

    let constraint = if ctx.match_one(Lexeme::Colon) {
        let constraint = parse_type(&ctx);
        ctx.require(constraint, Reason::MissingType)
    } else {
        Node::Empty
    };

    Some(MK_NODE!(
        Decl,
        DeclKind::GenericParameter(name.text),
        name.location,
        vec![constraint]
    ))
}
