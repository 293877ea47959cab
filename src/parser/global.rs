use crate::{
    ast::ast::{GlobalKind, Node, StmtKind, Visibility},
    errors::errors::{ContextTag, Reason},
    lexer::tokens::Lexeme,
    MK_NODE,
};

use super::{
    context::ParseContext,
    decl::{parse_generic_parameters, parse_tuple_decl},
    expr::parse_expr,
    parser::parse_delimited,
    stmt::parse_block_stmt,
    types::parse_type,
};

/// `module imports* definitions*`. Always produces a unit, however broken the input.
pub fn parse_translation_unit(ctx: &ParseContext<'_>) -> Node {
    let location = ctx.here();

    skip_misplaced_visibility(ctx);
    let module = {
        let decl = ctx.enter(ContextTag::ModuleDecl);
        let module = parse_module_decl(&decl);
        decl.emit_if_node_missing(&module, Reason::MissingDecl);
        module.unwrap_or_else(|| decl.missing())
    };

    let imports_location = ctx.here();
    let mut imports = Vec::new();
    loop {
        skip_misplaced_visibility(ctx);
        match parse_import_decl(ctx) {
            Some(items) => imports.extend(items),
            None => break,
        }
    }

    let mut definitions = Vec::new();
    while !ctx.at_end() {
        skip_misplaced_visibility(ctx);

        if ctx.peek_lexeme() == Lexeme::Import {
            let late = ctx.enter(ContextTag::ImportDecl);
            late.emit(Reason::RestrictedAction);
            if let Some(items) = parse_import_decl(&late) {
                imports.extend(items);
            }
            continue;
        }

        match parse_definition(ctx) {
            Some(definition) => definitions.push(definition),
            None => recover_definition(ctx),
        }
    }

    let imports = if imports.is_empty() {
        Node::Empty
    } else {
        MK_NODE!(Global, GlobalKind::ImportGroup, imports_location, imports)
    };

    let mut children = vec![module, imports];
    children.extend(definitions);

    MK_NODE!(
        Global,
        GlobalKind::TranslationUnit(ctx.file().to_string()),
        location,
        children
    )
}

/// Skips to the next token that can start a top-level item.
fn recover_definition(ctx: &ParseContext<'_>) {
    let location = ctx.here();
    ctx.advance();

    while !matches!(
        ctx.peek_lexeme(),
        Lexeme::Fn | Lexeme::Pub | Lexeme::Prv | Lexeme::Import | Lexeme::Eof
    ) {
        ctx.advance();
    }

    ctx.emit_at(Reason::Unknown, location);
}

/// A `pub`/`prv` in front of `module` or `import` is reported and dropped.
fn skip_misplaced_visibility(parent: &ParseContext<'_>) {
    let ctx = parent.enter(ContextTag::Definition);
    if !ctx.match_any(&[Lexeme::Pub, Lexeme::Prv]) {
        return;
    }

    if ctx.backtrack_if(!matches!(
        ctx.peek_lexeme(),
        Lexeme::Import | Lexeme::Module
    )) {
        return;
    }

    ctx.emit_at(Reason::RestrictedAction, ctx.location());
}

/// `module a.b.c;`
pub fn parse_module_decl(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::ModuleDecl);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Module)) {
        return None;
    }

    let path = parse_path(&ctx);
    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(MK_NODE!(Global, GlobalKind::Module(path), location))
}

/// Dot-separated names; reports a missing segment in the caller's context.
fn parse_path(ctx: &ParseContext<'_>) -> Vec<String> {
    let mut path = Vec::new();

    loop {
        let segment = ctx.peek();
        if ctx.emit_if(
            !ctx.match_any(&[Lexeme::Identifier, Lexeme::UserType]),
            Reason::MissingId,
        ) {
            break;
        }

        path.push(segment.text);
        if !ctx.match_one(Lexeme::Dot) {
            break;
        }
    }

    path
}

/// `import item;` or `import (item, ...);`. Yields one node per imported item.
pub fn parse_import_decl(parent: &ParseContext<'_>) -> Option<Vec<Node>> {
    let ctx = parent.enter(ContextTag::ImportDecl);
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Import)) {
        return None;
    }

    let items = if ctx.peek_lexeme() == Lexeme::OpenParen {
        let group = ctx.enter(ContextTag::ImportGroup);
        group.advance();
        parse_delimited(
            &group,
            Lexeme::CloseParen,
            Reason::MissingId,
            parse_import_item,
        )
    } else {
        vec![ctx.require(parse_import_item(&ctx), Reason::MissingId)]
    };

    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(items)
}

/// `a.b.c (as alias)?`
fn parse_import_item(ctx: &ParseContext<'_>) -> Option<Node> {
    let location = ctx.here();
    if !matches!(ctx.peek_lexeme(), Lexeme::Identifier | Lexeme::UserType) {
        return None;
    }

    let path = parse_path(ctx);

    let alias = if ctx.match_one(Lexeme::As) {
        let alias = ctx.peek();
        if ctx.emit_if(!ctx.match_one(Lexeme::Identifier), Reason::MissingId) {
            None
        } else {
            Some(alias.text)
        }
    } else {
        None
    };

    Some(MK_NODE!(Global, GlobalKind::Import { path, alias }, location))
}

/// `(pub | prv)? fn ...`
pub fn parse_definition(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Definition);
    let visibility = Visibility::from_lexeme(ctx.peek_lexeme());
    if visibility.is_some() {
        ctx.advance();
    }

    if ctx.peek_lexeme() != Lexeme::Fn {
        if ctx.backtrack_if(visibility.is_none()) {
            return None;
        }

        ctx.emit(Reason::MissingKeyword);
        return Some(Node::Missing(ctx.location()));
    }

    parse_function(&ctx, visibility.unwrap_or_default())
}

/// A prototype ending in `;`, or a function with a block or `:=> expr;` body.
pub fn parse_function(parent: &ParseContext<'_>, visibility: Visibility) -> Option<Node> {
    let ctx = parent.enter_with_visibility(ContextTag::FunctionPrototype, visibility);
    let location = parent.location();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Fn)) {
        return None;
    }

    let name = ctx.peek();
    let name = if ctx.emit_if(
        !ctx.match_any(&[Lexeme::Identifier, Lexeme::UserType]),
        Reason::MissingId,
    ) {
        String::new()
    } else {
        name.text
    };

    let generics = parse_generic_parameters(&ctx).unwrap_or(Node::Empty);
    let parameters = ctx.require(parse_tuple_decl(&ctx), Reason::MissingDecl);

    let returns = if ctx.match_one(Lexeme::Arrow) {
        ctx.require(parse_type(&ctx), Reason::MissingType)
    } else {
        Node::Empty
    };

    let prototype = MK_NODE!(
        Global,
        GlobalKind::FunctionPrototype {
            visibility: ctx.visibility().unwrap_or_default(),
            name
        },
        location,
        vec![generics, parameters, returns]
    );

    if ctx.match_one(Lexeme::Semicolon) {
        return Some(prototype);
    }

    ctx.to(ContextTag::Function);

    let body = if ctx.peek_lexeme() == Lexeme::OpenCurly {
        ctx.require(parse_block_stmt(&ctx), Reason::MissingBody)
    } else if ctx.match_one(Lexeme::ColonFatArrow) {
        // `:=> expr;` is shorthand for a body returning `expr`
        let body_location = ctx.here();
        let value = ctx.require(parse_expr(&ctx), Reason::MissingExpr);
        ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);
        MK_NODE!(Stmt, StmtKind::Return, body_location, vec![value])
    } else {
        ctx.emit(Reason::MissingBody);
        ctx.missing()
    };

    Some(MK_NODE!(
        Global,
        GlobalKind::Function,
        location,
        vec![prototype, body]
    ))
}
