use lazy_static::lazy_static;
use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
};

use crate::Location;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Lexeme> = {
        let mut map = HashMap::new();
        map.insert("module", Lexeme::Module);
        map.insert("import", Lexeme::Import);
        map.insert("as", Lexeme::As);
        map.insert("pub", Lexeme::Pub);
        map.insert("prv", Lexeme::Prv);
        map.insert("fn", Lexeme::Fn);
        map.insert("let", Lexeme::Let);
        map.insert("mut", Lexeme::Mut);
        map.insert("return", Lexeme::Return);
        map.insert("if", Lexeme::If);
        map.insert("elif", Lexeme::Elif);
        map.insert("else", Lexeme::Else);
        map.insert("loop", Lexeme::Loop);
        map.insert("in", Lexeme::In);
        map.insert("match", Lexeme::Match);
        map.insert("defer", Lexeme::Defer);
        map.insert("try", Lexeme::Try);
        map.insert("break", Lexeme::Break);
        map.insert("continue", Lexeme::Continue);
        map.insert("true", Lexeme::True);
        map.insert("false", Lexeme::False);
        map
    };

    pub static ref FUNDAMENTAL_TYPES: HashSet<&'static str> = [
        "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "f32", "f64", "bool", "char",
        "str", "void",
    ]
    .into_iter()
    .collect();

    pub static ref OPERATOR_TRIE: OperatorTrie = OperatorTrie::new(&[
        ("(", Lexeme::OpenParen),
        (")", Lexeme::CloseParen),
        ("[", Lexeme::OpenBracket),
        ("]", Lexeme::CloseBracket),
        ("{", Lexeme::OpenCurly),
        ("}", Lexeme::CloseCurly),
        (",", Lexeme::Comma),
        (";", Lexeme::Semicolon),
        (":", Lexeme::Colon),
        ("::", Lexeme::ColonColon),
        (":=>", Lexeme::ColonFatArrow),
        (".", Lexeme::Dot),
        ("..", Lexeme::DotDot),
        ("...", Lexeme::Ellipsis),
        ("?", Lexeme::Question),
        ("!", Lexeme::Not),
        ("!=", Lexeme::NotEquals),
        ("=", Lexeme::Assignment),
        ("==", Lexeme::Equals),
        ("=>", Lexeme::FatArrow),
        ("<", Lexeme::Less),
        ("<=", Lexeme::LessEquals),
        ("<<", Lexeme::ShiftLeft),
        ("<<=", Lexeme::ShiftLeftEquals),
        (">", Lexeme::Greater),
        (">=", Lexeme::GreaterEquals),
        (">>", Lexeme::ShiftRight),
        (">>=", Lexeme::ShiftRightEquals),
        ("+", Lexeme::Plus),
        ("+=", Lexeme::PlusEquals),
        ("-", Lexeme::Dash),
        ("-=", Lexeme::DashEquals),
        ("->", Lexeme::Arrow),
        ("*", Lexeme::Star),
        ("*=", Lexeme::StarEquals),
        ("/", Lexeme::Slash),
        ("/=", Lexeme::SlashEquals),
        ("%", Lexeme::Percent),
        ("%=", Lexeme::PercentEquals),
        ("&", Lexeme::Ampersand),
        ("&=", Lexeme::AmpersandEquals),
        ("&&", Lexeme::And),
        ("|", Lexeme::Pipe),
        ("|=", Lexeme::PipeEquals),
        ("||", Lexeme::Or),
        ("^", Lexeme::Caret),
        ("^=", Lexeme::CaretEquals),
        ("~", Lexeme::Tilde),
    ]);
}

/// Longest operator the trie will try to match.
pub const MAX_OPERATOR_LEN: usize = 3;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Lexeme {
    Eof,
    Identifier,
    FundamentalType,
    UserType,
    Anonymous,
    Integer,
    Float,
    String,

    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,

    Comma,
    Semicolon,
    Colon,
    ColonColon,
    ColonFatArrow, // :=>
    Dot,
    DotDot,
    Ellipsis,
    Question,

    Not,       // !
    NotEquals, // !=
    Assignment, // =
    Equals,    // ==
    FatArrow,  // =>

    Less,
    LessEquals,
    ShiftLeft,
    ShiftLeftEquals,
    Greater,
    GreaterEquals,
    ShiftRight,
    ShiftRightEquals,

    Plus,
    PlusEquals,
    Dash,
    DashEquals,
    Arrow,
    Star,
    StarEquals,
    Slash,
    SlashEquals,
    Percent,
    PercentEquals,

    Ampersand,
    AmpersandEquals,
    And,
    Pipe,
    PipeEquals,
    Or,
    Caret,
    CaretEquals,
    Tilde,

    // Reserved
    Module,
    Import,
    As,
    Pub,
    Prv,
    Fn,
    Let,
    Mut,
    Return,
    If,
    Elif,
    Else,
    Loop,
    In,
    Match,
    Defer,
    Try,
    Break,
    Continue,
    True,
    False,
}

impl Display for Lexeme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub lexeme: Lexeme,
    /// Raw source text, quotes and escapes included for strings.
    pub text: String,
    pub location: Location,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}` at {}", self.lexeme, self.text, self.location)
    }
}

#[derive(Debug, Default)]
struct TrieNode {
    children: Vec<(char, usize)>,
    lexeme: Option<Lexeme>,
}

/// Prefix tree over the operator spellings, walked one character at a time.
#[derive(Debug)]
pub struct OperatorTrie {
    nodes: Vec<TrieNode>,
}

impl OperatorTrie {
    pub fn new(entries: &[(&str, Lexeme)]) -> Self {
        let mut trie = OperatorTrie {
            nodes: vec![TrieNode::default()],
        };

        for (spelling, lexeme) in entries {
            let mut node = 0;
            for c in spelling.chars() {
                node = match trie.child(node, c) {
                    Some(next) => next,
                    None => {
                        trie.nodes.push(TrieNode::default());
                        let next = trie.nodes.len() - 1;
                        trie.nodes[node].children.push((c, next));
                        next
                    }
                };
            }
            trie.nodes[node].lexeme = Some(*lexeme);
        }

        trie
    }

    fn child(&self, node: usize, c: char) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .find(|(key, _)| *key == c)
            .map(|(_, next)| *next)
    }

    /// Whether some operator starts with `c`.
    pub fn starts(&self, c: char) -> bool {
        self.child(0, c).is_some()
    }

    /// Returns the longest operator that prefixes `chars` and its length in characters.
    ///
    /// Intermediate nodes without a lexeme (`:=` on the way to `:=>`) are walked
    /// through, but only complete spellings are ever returned.
    pub fn longest_match(&self, chars: impl IntoIterator<Item = char>) -> Option<(Lexeme, usize)> {
        let mut node = 0;
        let mut best = None;

        for (depth, c) in chars.into_iter().take(MAX_OPERATOR_LEN).enumerate() {
            match self.child(node, c) {
                Some(next) => node = next,
                None => break,
            }
            if let Some(lexeme) = self.nodes[node].lexeme {
                best = Some((lexeme, depth + 1));
            }
        }

        best
    }
}
