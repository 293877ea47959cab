//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_NODE!` - Creates a syntax node of a given family
//!
//! These macros reduce boilerplate in the lexer and the grammar handlers.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$lexeme` - The Lexeme
/// * `$text` - The token's source text
/// * `$location` - The location of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(Lexeme::Integer, "42".to_string(), location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($lexeme:expr, $text:expr, $location:expr) => {
        $crate::lexer::tokens::Token {
            lexeme: $lexeme,
            text: $text,
            location: $location,
        }
    };
}

/// Creates a syntax node wrapped in its family variant.
///
/// # Arguments
///
/// * `$family` - One of `Expr`, `Type`, `Decl`, `Stmt`, `Global`
/// * `$kind` - The family's kind value
/// * `$location` - Location of the first token of the production
/// * `$children` - Child nodes in grammar order (optional, defaults to none)
///
/// # Example
///
/// ```ignore
/// let node = MK_NODE!(Expr, ExprKind::Binary(op), location, vec![lhs, rhs]);
/// ```
#[macro_export]
macro_rules! MK_NODE {
    ($family:ident, $kind:expr, $location:expr) => {
        $crate::MK_NODE!($family, $kind, $location, Vec::new())
    };
    ($family:ident, $kind:expr, $location:expr, $children:expr) => {
        $crate::ast::ast::Node::$family($crate::ast::ast::SyntaxNode {
            kind: $kind,
            location: $location,
            children: $children,
        })
    };
}
