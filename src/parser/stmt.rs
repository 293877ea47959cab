use crate::{
    ast::ast::{Node, StmtKind},
    errors::errors::{ContextTag, Reason},
    lexer::tokens::Lexeme,
    MK_NODE,
};

use super::{
    context::ParseContext,
    decl::parse_decl,
    expr::parse_expr,
    lookups::{ASSIGNMENT_LOOKUP, STMT_LOOKUP},
};

pub fn parse_stmt(ctx: &ParseContext<'_>) -> Option<Node> {
    if let Some(missing) = ctx.skip_if_too_deep() {
        skip_rest_of_statement(ctx);
        return Some(missing);
    }

    match STMT_LOOKUP.get(&ctx.peek_lexeme()) {
        Some(handler) => handler(ctx),
        None => parse_expression_stmt(ctx),
    }
}

pub fn parse_block_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Block);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::OpenCurly)) {
        return None;
    }

    let mut statements = Vec::new();
    loop {
        if ctx.match_one(Lexeme::CloseCurly) {
            break;
        }

        if ctx.at_end() {
            ctx.emit(Reason::MissingEnclosingSymbol);
            break;
        }

        match parse_stmt(&ctx) {
            Some(stmt) => statements.push(stmt),
            None => recover_statement(&ctx),
        }
    }

    Some(MK_NODE!(Stmt, StmtKind::Block, location, statements))
}

/// Reports the unparsable statement and moves past it, always making progress
/// unless the block is already closing.
fn recover_statement(ctx: &ParseContext<'_>) {
    ctx.emit(Reason::MissingStmt);

    let skipped = ctx.skip_until(&[]);
    if skipped == 0 {
        skip_rest_of_statement(ctx);
    } else {
        ctx.match_one(Lexeme::Semicolon);
    }
}

/// Consumes the `;` at the cursor, or a stray closer that would stall the block.
fn skip_rest_of_statement(ctx: &ParseContext<'_>) {
    if ctx.match_one(Lexeme::Semicolon) {
        return;
    }

    if !matches!(ctx.peek_lexeme(), Lexeme::CloseCurly | Lexeme::Eof) {
        ctx.advance();
    }
}

/// `let decl (= expr)? ;`
pub fn parse_declaration_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Declaration);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Let)) {
        return None;
    }

    let decl = ctx.require(parse_decl(&ctx), Reason::MissingDecl);

    let value = if ctx.match_one(Lexeme::Assignment) {
        ctx.require(parse_expr(&ctx), Reason::MissingExpr)
    } else {
        Node::Empty
    };

    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(MK_NODE!(
        Stmt,
        StmtKind::Declaration,
        location,
        vec![decl, value]
    ))
}

pub fn parse_return_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Return);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Return)) {
        return None;
    }

    let value = parse_expr(&ctx).unwrap_or(Node::Empty);
    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(MK_NODE!(Stmt, StmtKind::Return, location, vec![value]))
}

/// `if cond {..} (elif cond {..})* (else {..})?`; each `elif` nests another conditional.
pub fn parse_conditional_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Conditional);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_any(&[Lexeme::If, Lexeme::Elif])) {
        return None;
    }

    let condition = ctx.require(parse_expr(&ctx), Reason::MissingExpr);
    let then = ctx.require(parse_block_stmt(&ctx), Reason::MissingBody);

    let otherwise = match ctx.peek_lexeme() {
        Lexeme::Elif => ctx.require(parse_conditional_stmt(&ctx), Reason::MissingBody),
        Lexeme::Else => {
            ctx.advance();
            ctx.require(parse_block_stmt(&ctx), Reason::MissingBody)
        }
        _ => Node::Empty,
    };

    Some(MK_NODE!(
        Stmt,
        StmtKind::Conditional,
        location,
        vec![condition, then, otherwise]
    ))
}

/// `loop {..}`, `loop decl in expr {..}` or `loop cond {..}`.
pub fn parse_loop_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Loop);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Loop)) {
        return None;
    }

    let (binding, condition) = if ctx.peek_lexeme() == Lexeme::OpenCurly {
        (Node::Empty, Node::Empty)
    } else if let Some(iteration) = parse_loop_binding(&ctx) {
        iteration
    } else {
        (
            Node::Empty,
            ctx.require(parse_expr(&ctx), Reason::MissingExpr),
        )
    };

    let body = ctx.require(parse_block_stmt(&ctx), Reason::MissingBody);

    Some(MK_NODE!(
        Stmt,
        StmtKind::Loop,
        location,
        vec![binding, condition, body]
    ))
}

/// `decl in expr`; backs off when no `in` follows so the tokens can be read as a condition.
fn parse_loop_binding(parent: &ParseContext<'_>) -> Option<(Node, Node)> {
    let ctx = parent.enter(ContextTag::Loop);

    let Some(binding) = parse_decl(&ctx) else {
        ctx.backtrack();
        return None;
    };

    if ctx.backtrack_if(!ctx.match_one(Lexeme::In)) {
        return None;
    }

    let iterable = ctx.require(parse_expr(&ctx), Reason::MissingExpr);
    Some((binding, iterable))
}

/// `match expr { pattern => body, ... }`
pub fn parse_match_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Match);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Match)) {
        return None;
    }

    let scrutinee = ctx.require(parse_expr(&ctx), Reason::MissingExpr);
    let mut children = vec![scrutinee];

    if ctx.emit_if_lexeme_not_present(Lexeme::OpenCurly, Reason::MissingSymbol) {
        return Some(MK_NODE!(Stmt, StmtKind::Match, location, children));
    }

    loop {
        if ctx.match_one(Lexeme::CloseCurly) {
            break;
        }

        if ctx.at_end() {
            ctx.emit(Reason::MissingEnclosingSymbol);
            break;
        }

        match parse_match_case(&ctx) {
            Some(case) => children.push(case),
            None => {
                ctx.emit(Reason::MissingExpr);
                let skipped = ctx.skip_until(&[Lexeme::Comma, Lexeme::CloseCurly]);
                if !ctx.match_one(Lexeme::Comma)
                    && skipped == 0
                    && ctx.peek_lexeme() != Lexeme::CloseCurly
                {
                    ctx.advance();
                }
            }
        }
    }

    Some(MK_NODE!(Stmt, StmtKind::Match, location, children))
}

fn parse_match_case(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::MatchCase);
    let location = ctx.here();

    let Some(pattern) = parse_expr(&ctx) else {
        ctx.backtrack();
        return None;
    };

    ctx.emit_if_lexeme_not_present(Lexeme::FatArrow, Reason::MissingSymbol);
    let body = ctx.require(parse_case_body(&ctx), Reason::MissingBody);
    ctx.match_one(Lexeme::Comma);

    Some(MK_NODE!(
        Stmt,
        StmtKind::MatchCase,
        location,
        vec![pattern, body]
    ))
}

/// A block, or a bare expression ended by the case's `,`.
fn parse_case_body(ctx: &ParseContext<'_>) -> Option<Node> {
    if ctx.peek_lexeme() == Lexeme::OpenCurly {
        return parse_block_stmt(ctx);
    }

    let location = ctx.here();
    let expr = parse_expr(ctx)?;
    Some(MK_NODE!(Stmt, StmtKind::Expression, location, vec![expr]))
}

/// `defer stmt`. Deferring a `return` or another `defer` is reported but kept.
pub fn parse_defer_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Defer);
    let location = ctx.here();
    if ctx.backtrack_if(!ctx.match_one(Lexeme::Defer)) {
        return None;
    }

    let restricted = matches!(ctx.peek_lexeme(), Lexeme::Return | Lexeme::Defer);
    ctx.emit_if(restricted, Reason::RestrictedAction);

    let stmt = ctx.require(parse_stmt(&ctx), Reason::MissingStmt);

    Some(MK_NODE!(Stmt, StmtKind::Defer, location, vec![stmt]))
}

/// `break;` or `continue;`
pub fn parse_jump_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::Jump);
    let token = ctx.peek();

    let kind = match token.lexeme {
        Lexeme::Break => StmtKind::Break,
        Lexeme::Continue => StmtKind::Continue,
        _ => {
            ctx.backtrack();
            return None;
        }
    };

    ctx.advance();
    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(MK_NODE!(Stmt, kind, token.location))
}

/// `expr ;` or, once an assignment operator follows the expression, `target op= value ;`.
pub fn parse_expression_stmt(parent: &ParseContext<'_>) -> Option<Node> {
    let ctx = parent.enter(ContextTag::ExpressionStatement);
    let location = ctx.here();

    let Some(expr) = parse_expr(&ctx) else {
        ctx.backtrack();
        return None;
    };

    let operator = ctx.peek_lexeme();
    if ASSIGNMENT_LOOKUP.contains(&operator) {
        ctx.to(ContextTag::Assignment);
        ctx.advance();

        let value = ctx.require(parse_expr(&ctx), Reason::MissingExpr);
        ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

        return Some(MK_NODE!(
            Stmt,
            StmtKind::Assignment(operator),
            location,
            vec![expr, value]
        ));
    }

    ctx.emit_if_lexeme_not_present(Lexeme::Semicolon, Reason::MissingSymbol);

    Some(MK_NODE!(Stmt, StmtKind::Expression, location, vec![expr]))
}
