use std::fmt::Display;

use thiserror::Error;

use crate::Location;

/// Which production was active when a diagnostic was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextTag {
    Lexer,
    TranslationUnit,
    ModuleDecl,
    ImportDecl,
    ImportGroup,
    Definition,
    FunctionPrototype,
    Function,
    GenericParameters,
    GenericParameter,
    DeclTuple,
    DeclIdentifier,
    Statement,
    Block,
    Declaration,
    Return,
    Assignment,
    Conditional,
    Loop,
    Match,
    MatchCase,
    Defer,
    Jump,
    ExpressionStatement,
    Expression,
    Prefix,
    Ternary,
    Try,
    Tuple,
    Array,
    Record,
    Call,
    Index,
    String,
    Literal,
    Type,
    TypeTuple,
    TypeArray,
    TypeFunction,
    GenericArguments,
}

impl ContextTag {
    /// Noun used when a message has no specialised wording for this context.
    pub fn noun(&self) -> &'static str {
        match self {
            ContextTag::Lexer => "source text",
            ContextTag::TranslationUnit => "translation unit",
            ContextTag::ModuleDecl => "module declaration",
            ContextTag::ImportDecl => "import declaration",
            ContextTag::ImportGroup => "import group",
            ContextTag::Definition => "definition",
            ContextTag::FunctionPrototype => "function prototype",
            ContextTag::Function => "function",
            ContextTag::GenericParameters => "generic parameter list",
            ContextTag::GenericParameter => "generic parameter",
            ContextTag::DeclTuple => "tuple declaration",
            ContextTag::DeclIdentifier => "declaration",
            ContextTag::Statement => "statement",
            ContextTag::Block => "block",
            ContextTag::Declaration => "let statement",
            ContextTag::Return => "return statement",
            ContextTag::Assignment => "assignment",
            ContextTag::Conditional => "conditional",
            ContextTag::Loop => "loop",
            ContextTag::Match => "match",
            ContextTag::MatchCase => "match case",
            ContextTag::Defer => "defer statement",
            ContextTag::Jump => "jump statement",
            ContextTag::ExpressionStatement => "expression statement",
            ContextTag::Expression => "expression",
            ContextTag::Prefix => "prefix expression",
            ContextTag::Ternary => "ternary expression",
            ContextTag::Try => "try expression",
            ContextTag::Tuple => "tuple",
            ContextTag::Array => "array",
            ContextTag::Record => "record",
            ContextTag::Call => "call",
            ContextTag::Index => "index",
            ContextTag::String => "string placeholder",
            ContextTag::Literal => "literal",
            ContextTag::Type => "type",
            ContextTag::TypeTuple => "tuple type",
            ContextTag::TypeArray => "array type",
            ContextTag::TypeFunction => "function type",
            ContextTag::GenericArguments => "generic argument list",
        }
    }

    /// Closing symbol of a parenthesised or bracketed list context.
    fn closing_symbol(&self) -> Option<char> {
        match self {
            ContextTag::Tuple
            | ContextTag::DeclTuple
            | ContextTag::TypeTuple
            | ContextTag::TypeFunction
            | ContextTag::Call
            | ContextTag::ImportGroup => Some(')'),
            ContextTag::Array
            | ContextTag::TypeArray
            | ContextTag::Index
            | ContextTag::GenericArguments
            | ContextTag::GenericParameters => Some(']'),
            _ => None,
        }
    }

    fn terminated_by_semicolon(&self) -> bool {
        matches!(
            self,
            ContextTag::ModuleDecl
                | ContextTag::ImportDecl
                | ContextTag::Declaration
                | ContextTag::Return
                | ContextTag::Assignment
                | ContextTag::ExpressionStatement
                | ContextTag::Jump
                | ContextTag::Function
        )
    }
}

impl Display for ContextTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    NotAnError,
    MissingSymbol,
    MissingKeyword,
    MissingEnclosingSymbol,
    MissingExpr,
    MissingType,
    MissingId,
    MissingDecl,
    MissingStmt,
    MissingBody,
    RestrictedAction,
    NestingTooDeep,
    Unknown,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Renders the message for a `(context, reason)` pair.
pub fn render_message(context: ContextTag, reason: Reason) -> String {
    let noun = context.noun();

    match (context, reason) {
        (_, Reason::NotAnError) => String::from("No error."),

        (ContextTag::Lexer, Reason::Unknown) => String::from("Unrecognized character."),
        (ContextTag::Lexer, Reason::MissingEnclosingSymbol) => {
            String::from("Missing closing '\"' of string literal.")
        }
        (ContextTag::Literal, Reason::Unknown) => String::from("Malformed literal."),

        (_, Reason::MissingEnclosingSymbol) => match context.closing_symbol() {
            Some(symbol) => format!("Missing '{}'", symbol),
            None => format!("Missing enclosing {}.", noun),
        },

        (ContextTag::MatchCase, Reason::MissingSymbol) => {
            String::from("Missing '=>' after match pattern.")
        }
        (ContextTag::Ternary, Reason::MissingSymbol) => {
            String::from("Missing ':' in ternary expression.")
        }
        (ContextTag::Record, Reason::MissingSymbol) => {
            String::from("Missing ':' after field name.")
        }
        (_, Reason::MissingSymbol) if context.terminated_by_semicolon() => {
            format!("Missing ';' after {}.", noun)
        }
        (_, Reason::MissingSymbol) => format!("Missing symbol in {}.", noun),

        (ContextTag::Definition, Reason::MissingKeyword) => {
            String::from("Missing 'fn' after visibility modifier.")
        }
        (_, Reason::MissingKeyword) => format!("Missing keyword in {}.", noun),

        (_, Reason::MissingExpr) => format!("Expected an expression in {}.", noun),
        (_, Reason::MissingType) => format!("Expected a type in {}.", noun),
        (_, Reason::MissingId) => format!("Expected an identifier in {}.", noun),

        (ContextTag::ModuleDecl, Reason::MissingDecl) => {
            String::from("Missing module declaration.")
        }
        (_, Reason::MissingDecl) => format!("Expected a declaration in {}.", noun),

        (_, Reason::MissingStmt) => format!("Expected a statement in {}.", noun),
        (_, Reason::MissingBody) => format!("Missing body of {}.", noun),

        (ContextTag::Definition, Reason::RestrictedAction) => {
            String::from("Visibility modifiers only apply to definitions.")
        }
        (ContextTag::ImportDecl, Reason::RestrictedAction) => {
            String::from("Imports must precede definitions.")
        }
        (ContextTag::Defer, Reason::RestrictedAction) => {
            String::from("Cannot defer a return or another defer.")
        }
        (_, Reason::RestrictedAction) => format!("Action not allowed in {}.", noun),

        (_, Reason::NestingTooDeep) => format!("Too deeply nested {}.", noun),

        (_, Reason::Unknown) => format!("Unexpected input in {}.", noun),
    }
}

/// A contextualised, user-facing diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub context: ContextTag,
    pub reason: Reason,
    pub file: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(context: ContextTag, reason: Reason, file: &str, location: Location) -> Self {
        Diagnostic {
            context,
            reason,
            file: String::from(file),
            location,
        }
    }

    pub fn get_location(&self) -> Location {
        self.location
    }

    pub fn get_reason_name(&self) -> String {
        self.reason.to_string()
    }

    pub fn message(&self) -> String {
        render_message(self.context, self.reason)
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: error: {}", self.file, self.location, self.message())
    }
}

/// Renders a diagnostic with the offending source line and a caret.
///
/// Tabs in the line are expanded to `tab_width` so the caret lines up with the
/// diagnostic's column.
///
/// ```text
/// error: Missing ';' after let statement.
/// -> main.src
///    |
/// 20 | let a = 5
///    | ---------^
/// ```
pub fn render_diagnostic(diagnostic: &Diagnostic, source: &str, tab_width: u32) -> String {
    let line_number = (diagnostic.location.line + 1).to_string();
    let padding = line_number.len() + 2;
    let line_text = source
        .lines()
        .nth(diagnostic.location.line as usize)
        .unwrap_or("");

    let expanded = expand_tabs(line_text, tab_width);
    let (trimmed, removed) = remove_starting_whitespace(&expanded);
    let arrows = (diagnostic.location.column as usize).saturating_sub(removed) + 1;

    let mut out = String::new();
    out.push_str(&format!("error: {}\n", diagnostic.message()));
    out.push_str(&format!("-> {}\n", diagnostic.file));
    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_number, trimmed.trim_end()));
    out.push_str(&format!("{:>padding$} {:->arrows$}", "|", "^"));
    out
}

/// Replaces tabs with spaces up to the next tab stop, as the lexer counts columns.
fn expand_tabs(string: &str, tab_width: u32) -> String {
    let width = tab_width.max(1) as usize;
    let mut out = String::with_capacity(string.len());
    let mut column = 0;

    for c in string.chars() {
        if c == '\t' {
            let stop = (column / width + 1) * width;
            out.extend(std::iter::repeat(' ').take(stop - column));
            column = stop;
        } else {
            out.push(c);
            column += 1;
        }
    }

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (&string[start..], start)
}

/// Failures that abort a front end run instead of becoming diagnostics.
#[derive(Error, Debug)]
pub enum Error {
    #[error("backtrack requested with no live checkpoint")]
    CheckpointUnderflow,
    #[error("checkpoint released out of order: expected depth {expected}, found {found}")]
    CheckpointOrder { expected: usize, found: usize },
    #[error("source has {} diagnostic(s)", .0.len())]
    Diagnostics(Vec<Diagnostic>),
    #[error("failed to read source: {0}")]
    Io(#[from] std::io::Error),
}
