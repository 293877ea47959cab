use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::{ast::ast::Node, lexer::tokens::Lexeme};

use super::{context::ParseContext, expr::*, stmt::*, types::*};

/// Operator precedence levels, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(u8)]
pub enum BindingPower {
    Default = 0,
    Ternary,
    Range,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    BitOr,
    BitXor,
    BitAnd,
    Shift,
    Additive,
    Multiplicative,
    Prefix,
    Member,
    Postfix,
}

impl BindingPower {
    pub fn level(self) -> u8 {
        self as u8
    }
}

/// Type operator precedence levels, loosest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
#[repr(u8)]
pub enum TypeBindingPower {
    Default = 0,
    Union,
    Intersection,
    Path,
    Generic,
}

pub type StmtHandler = fn(&ParseContext<'_>) -> Option<Node>;
pub type NUDHandler = fn(&ParseContext<'_>) -> Option<Node>;
pub type TypeNUDHandler = fn(&ParseContext<'_>) -> Option<Node>;

lazy_static! {
    pub static ref BP_LOOKUP: HashMap<Lexeme, BindingPower> = {
        let mut map = HashMap::new();
        map.insert(Lexeme::Question, BindingPower::Ternary);

        map.insert(Lexeme::DotDot, BindingPower::Range);
        map.insert(Lexeme::Ellipsis, BindingPower::Range);

        // Logical
        map.insert(Lexeme::Or, BindingPower::LogicalOr);
        map.insert(Lexeme::And, BindingPower::LogicalAnd);

        // Relational
        map.insert(Lexeme::Equals, BindingPower::Equality);
        map.insert(Lexeme::NotEquals, BindingPower::Equality);
        map.insert(Lexeme::Less, BindingPower::Relational);
        map.insert(Lexeme::LessEquals, BindingPower::Relational);
        map.insert(Lexeme::Greater, BindingPower::Relational);
        map.insert(Lexeme::GreaterEquals, BindingPower::Relational);

        // Bitwise
        map.insert(Lexeme::Pipe, BindingPower::BitOr);
        map.insert(Lexeme::Caret, BindingPower::BitXor);
        map.insert(Lexeme::Ampersand, BindingPower::BitAnd);
        map.insert(Lexeme::ShiftLeft, BindingPower::Shift);
        map.insert(Lexeme::ShiftRight, BindingPower::Shift);

        // Additive and multiplicative
        map.insert(Lexeme::Plus, BindingPower::Additive);
        map.insert(Lexeme::Dash, BindingPower::Additive);
        map.insert(Lexeme::Star, BindingPower::Multiplicative);
        map.insert(Lexeme::Slash, BindingPower::Multiplicative);
        map.insert(Lexeme::Percent, BindingPower::Multiplicative);

        // Member
        map.insert(Lexeme::Dot, BindingPower::Member);
        map.insert(Lexeme::ColonColon, BindingPower::Member);

        // Call and index
        map.insert(Lexeme::OpenParen, BindingPower::Postfix);
        map.insert(Lexeme::OpenBracket, BindingPower::Postfix);
        map
    };

    /// Operators folded left to right; everything else in the tables associates right.
    pub static ref LEFT_ASSOCIATIVE: HashSet<Lexeme> = [
        Lexeme::DotDot,
        Lexeme::Ellipsis,
        Lexeme::Or,
        Lexeme::And,
        Lexeme::Equals,
        Lexeme::NotEquals,
        Lexeme::Less,
        Lexeme::LessEquals,
        Lexeme::Greater,
        Lexeme::GreaterEquals,
        Lexeme::Pipe,
        Lexeme::Caret,
        Lexeme::Ampersand,
        Lexeme::ShiftLeft,
        Lexeme::ShiftRight,
        Lexeme::Plus,
        Lexeme::Dash,
        Lexeme::Star,
        Lexeme::Slash,
        Lexeme::Percent,
        Lexeme::Dot,
        Lexeme::ColonColon,
    ]
    .into_iter()
    .collect();

    pub static ref PREFIX_LOOKUP: HashSet<Lexeme> = [
        Lexeme::Dash,
        Lexeme::Not,
        Lexeme::Tilde,
        Lexeme::Ampersand,
        Lexeme::Star,
        Lexeme::Try,
    ]
    .into_iter()
    .collect();

    pub static ref ASSIGNMENT_LOOKUP: HashSet<Lexeme> = [
        Lexeme::Assignment,
        Lexeme::PlusEquals,
        Lexeme::DashEquals,
        Lexeme::StarEquals,
        Lexeme::SlashEquals,
        Lexeme::PercentEquals,
        Lexeme::AmpersandEquals,
        Lexeme::PipeEquals,
        Lexeme::CaretEquals,
        Lexeme::ShiftLeftEquals,
        Lexeme::ShiftRightEquals,
    ]
    .into_iter()
    .collect();

    pub static ref TYPE_BP_LOOKUP: HashMap<Lexeme, TypeBindingPower> = {
        let mut map = HashMap::new();
        map.insert(Lexeme::Pipe, TypeBindingPower::Union);
        map.insert(Lexeme::Ampersand, TypeBindingPower::Intersection);
        map.insert(Lexeme::Dot, TypeBindingPower::Path);
        map.insert(Lexeme::OpenBracket, TypeBindingPower::Generic);
        map
    };

    pub static ref TYPE_LEFT_ASSOCIATIVE: HashSet<Lexeme> =
        [Lexeme::Pipe, Lexeme::Ampersand, Lexeme::Dot].into_iter().collect();

    pub static ref NUD_LOOKUP: HashMap<Lexeme, NUDHandler> = {
        let mut map: HashMap<Lexeme, NUDHandler> = HashMap::new();
        map.insert(Lexeme::Identifier, parse_identifier_expr);
        map.insert(Lexeme::UserType, parse_identifier_expr);
        map.insert(Lexeme::Anonymous, parse_identifier_expr);
        map.insert(Lexeme::Integer, parse_literal_expr);
        map.insert(Lexeme::Float, parse_literal_expr);
        map.insert(Lexeme::True, parse_literal_expr);
        map.insert(Lexeme::False, parse_literal_expr);
        map.insert(Lexeme::String, parse_string_expr);
        map.insert(Lexeme::OpenParen, parse_tuple_expr);
        map.insert(Lexeme::OpenBracket, parse_array_expr);
        map.insert(Lexeme::OpenCurly, parse_record_expr);
        map
    };

    pub static ref TYPE_NUD_LOOKUP: HashMap<Lexeme, TypeNUDHandler> = {
        let mut map: HashMap<Lexeme, TypeNUDHandler> = HashMap::new();
        map.insert(Lexeme::FundamentalType, parse_symbol_type);
        map.insert(Lexeme::UserType, parse_symbol_type);
        map.insert(Lexeme::Identifier, parse_symbol_type);
        map.insert(Lexeme::Anonymous, parse_infer_type);
        map.insert(Lexeme::OpenParen, parse_tuple_type);
        map.insert(Lexeme::OpenBracket, parse_array_type);
        map.insert(Lexeme::Fn, parse_function_type);
        map
    };

    pub static ref STMT_LOOKUP: HashMap<Lexeme, StmtHandler> = {
        let mut map: HashMap<Lexeme, StmtHandler> = HashMap::new();
        map.insert(Lexeme::OpenCurly, parse_block_stmt);
        map.insert(Lexeme::Let, parse_declaration_stmt);
        map.insert(Lexeme::Return, parse_return_stmt);
        map.insert(Lexeme::If, parse_conditional_stmt);
        map.insert(Lexeme::Loop, parse_loop_stmt);
        map.insert(Lexeme::Match, parse_match_stmt);
        map.insert(Lexeme::Defer, parse_defer_stmt);
        map.insert(Lexeme::Break, parse_jump_stmt);
        map.insert(Lexeme::Continue, parse_jump_stmt);
        map
    };
}
