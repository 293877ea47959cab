use std::rc::Rc;

use tracing::{debug, trace};

use crate::{
    errors::errors::{ContextTag, Diagnostic, Reason},
    Location, Options, MK_TOKEN,
};

use super::{
    stream::TextStream,
    tokens::{Lexeme, Token, FUNDAMENTAL_TYPES, OPERATOR_TRIE, RESERVED_LOOKUP},
};

/// Handler invoked once the lexer has classified the character under the cursor.
pub type CharHandler = fn(&mut Lexer);

pub struct Lexer {
    stream: TextStream,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, options: &Options) -> Lexer {
        Lexer {
            stream: TextStream::new(source, options.tab_width),
            tokens: vec![],
            diagnostics: vec![],
            file: Rc::new(options.file_name()),
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    fn error(&mut self, reason: Reason, location: Location) {
        self.diagnostics.push(Diagnostic::new(
            ContextTag::Lexer,
            reason,
            &self.file,
            location,
        ));
    }

    /// Picks the handler for the character under the cursor.
    fn classify(&self) -> CharHandler {
        match (self.stream.current(), self.stream.peek()) {
            (Some(c), _) if c.is_whitespace() => skip_handler,
            (Some('/'), Some('/')) => comment_handler,
            (Some('"'), _) => string_handler,
            (Some(c), _) if c.is_ascii_digit() => number_handler,
            (Some(c), _) if c.is_ascii_alphabetic() || c == '_' => symbol_handler,
            (Some(c), _) if OPERATOR_TRIE.starts(c) => operator_handler,
            _ => unrecognized_handler,
        }
    }

    pub fn at_eof(&self) -> bool {
        self.stream.done()
    }

    /// Runs the lexer to completion and returns the tokens (ending in `Eof`)
    /// and lexical diagnostics.
    pub fn run(mut self) -> (Vec<Token>, Vec<Diagnostic>) {
        while !self.at_eof() {
            let handler = self.classify();
            handler(&mut self);
        }

        let end = self.stream.location();
        self.push(MK_TOKEN!(Lexeme::Eof, String::new(), end));

        debug!(
            file = %self.file,
            tokens = self.tokens.len(),
            errors = self.diagnostics.len(),
            "tokenized"
        );

        (self.tokens, self.diagnostics)
    }
}

fn skip_handler(lexer: &mut Lexer) {
    lexer.stream.advance();
}

fn comment_handler(lexer: &mut Lexer) {
    lexer.stream.skip_line();
}

fn unrecognized_handler(lexer: &mut Lexer) {
    let location = lexer.stream.location();
    trace!(character = ?lexer.stream.current(), %location, "skipping unrecognized character");
    lexer.error(Reason::Unknown, location);
    lexer.stream.advance();
}

fn operator_handler(lexer: &mut Lexer) {
    let location = lexer.stream.location();
    let start = lexer.stream.position();

    match OPERATOR_TRIE.longest_match(lexer.stream.remainder().iter().copied()) {
        Some((lexeme, length)) => {
            lexer.stream.advance_n(length);
            let text = lexer.stream.text_from(start);
            lexer.push(MK_TOKEN!(lexeme, text, location));
        }
        None => unrecognized_handler(lexer),
    }
}

fn number_handler(lexer: &mut Lexer) {
    let location = lexer.stream.location();
    let start = lexer.stream.position();

    while lexer.stream.match_if(|c| c.is_ascii_digit()) {}

    // `1..5` is a range, not the float `1.` followed by `.5`
    let mut lexeme = Lexeme::Integer;
    if lexer.stream.current() == Some('.')
        && lexer.stream.peek().is_some_and(|c| c.is_ascii_digit())
    {
        lexer.stream.advance();
        while lexer.stream.match_if(|c| c.is_ascii_digit()) {}
        lexeme = Lexeme::Float;
    }

    let text = lexer.stream.text_from(start);
    lexer.push(MK_TOKEN!(lexeme, text, location));
}

fn string_handler(lexer: &mut Lexer) {
    let location = lexer.stream.location();
    let start = lexer.stream.position();
    lexer.stream.advance();

    loop {
        match lexer.stream.current() {
            None | Some('\n') | Some('\r') => {
                let here = lexer.stream.location();
                lexer.error(Reason::MissingEnclosingSymbol, here);
                break;
            }
            Some('\\') => {
                lexer.stream.advance();
                if !matches!(lexer.stream.current(), None | Some('\n') | Some('\r')) {
                    lexer.stream.advance();
                }
            }
            Some('"') => {
                lexer.stream.advance();
                break;
            }
            Some(_) => lexer.stream.advance(),
        }
    }

    let text = lexer.stream.text_from(start);
    lexer.push(MK_TOKEN!(Lexeme::String, text, location));
}

fn symbol_handler(lexer: &mut Lexer) {
    let location = lexer.stream.location();
    let start = lexer.stream.position();

    while lexer.stream.match_if(|c| c.is_ascii_alphanumeric() || c == '_') {}

    let text = lexer.stream.text_from(start);
    let lexeme = classify_word(&text);
    lexer.push(MK_TOKEN!(lexeme, text, location));
}

/// Keyword, then fundamental type, then the capitalisation convention.
pub fn classify_word(word: &str) -> Lexeme {
    if word == "_" {
        return Lexeme::Anonymous;
    }

    if let Some(lexeme) = RESERVED_LOOKUP.get(word) {
        return *lexeme;
    }

    if FUNDAMENTAL_TYPES.contains(word) {
        return Lexeme::FundamentalType;
    }

    if word.starts_with(|c: char| c.is_ascii_uppercase()) {
        Lexeme::UserType
    } else {
        Lexeme::Identifier
    }
}

pub fn tokenize(source: &str, file: Option<String>) -> (Vec<Token>, Vec<Diagnostic>) {
    tokenize_with(
        source,
        &Options {
            file,
            ..Options::default()
        },
    )
}

pub fn tokenize_with(source: &str, options: &Options) -> (Vec<Token>, Vec<Diagnostic>) {
    Lexer::new(source, options).run()
}
