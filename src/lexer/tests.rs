//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, fundamental types and identifier classes
//! - Numeric literals and the float/range split
//! - Longest-match operator resolution
//! - String literals and comments
//! - Locations and error cases

use super::{
    lexer::{classify_word, tokenize, tokenize_with},
    tokens::{Lexeme, OPERATOR_TRIE},
};
use crate::{errors::errors::{ContextTag, Reason}, Location, Options};

fn lexemes(source: &str) -> Vec<Lexeme> {
    let (tokens, _) = tokenize(source, Some("test.src".to_string()));
    tokens.into_iter().map(|token| token.lexeme).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "module import as pub prv fn let mut return if elif else loop in match defer try break continue true false";
    let tokens = lexemes(source);

    assert_eq!(
        tokens,
        vec![
            Lexeme::Module,
            Lexeme::Import,
            Lexeme::As,
            Lexeme::Pub,
            Lexeme::Prv,
            Lexeme::Fn,
            Lexeme::Let,
            Lexeme::Mut,
            Lexeme::Return,
            Lexeme::If,
            Lexeme::Elif,
            Lexeme::Else,
            Lexeme::Loop,
            Lexeme::In,
            Lexeme::Match,
            Lexeme::Defer,
            Lexeme::Try,
            Lexeme::Break,
            Lexeme::Continue,
            Lexeme::True,
            Lexeme::False,
            Lexeme::Eof,
        ]
    );
}

#[test]
fn test_tokenize_identifier_classes() {
    let (tokens, errors) = tokenize("foo baz_123 _under Point i32 _ void", None);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].lexeme, Lexeme::Identifier);
    assert_eq!(tokens[0].text, "foo");
    assert_eq!(tokens[1].lexeme, Lexeme::Identifier);
    assert_eq!(tokens[2].lexeme, Lexeme::Identifier);
    assert_eq!(tokens[2].text, "_under");
    assert_eq!(tokens[3].lexeme, Lexeme::UserType);
    assert_eq!(tokens[4].lexeme, Lexeme::FundamentalType);
    assert_eq!(tokens[5].lexeme, Lexeme::Anonymous);
    assert_eq!(tokens[6].lexeme, Lexeme::FundamentalType);
    assert_eq!(tokens[7].lexeme, Lexeme::Eof);
}

#[test]
fn test_dropped_keywords_are_identifiers() {
    assert_eq!(classify_word("pure"), Lexeme::Identifier);
    assert_eq!(classify_word("interface"), Lexeme::Identifier);
    assert_eq!(classify_word("Abstract"), Lexeme::UserType);
}

#[test]
fn test_tokenize_numbers() {
    let (tokens, _) = tokenize("42 3.14 7", None);

    assert_eq!(tokens[0].lexeme, Lexeme::Integer);
    assert_eq!(tokens[0].text, "42");
    assert_eq!(tokens[1].lexeme, Lexeme::Float);
    assert_eq!(tokens[1].text, "3.14");
    assert_eq!(tokens[2].lexeme, Lexeme::Integer);
}

#[test]
fn test_range_is_not_a_float() {
    let (tokens, _) = tokenize("0..5", None);

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[0].lexeme, Lexeme::Integer);
    assert_eq!(tokens[0].text, "0");
    assert_eq!(tokens[1].lexeme, Lexeme::DotDot);
    assert_eq!(tokens[2].lexeme, Lexeme::Integer);
    assert_eq!(tokens[2].text, "5");
}

#[test]
fn test_member_access_on_integer() {
    assert_eq!(
        lexemes("1.x"),
        vec![Lexeme::Integer, Lexeme::Dot, Lexeme::Identifier, Lexeme::Eof]
    );
}

#[test]
fn test_longest_match() {
    assert_eq!(lexemes("<<="), vec![Lexeme::ShiftLeftEquals, Lexeme::Eof]);
    assert_eq!(lexemes(">>="), vec![Lexeme::ShiftRightEquals, Lexeme::Eof]);
    assert_eq!(lexemes("..."), vec![Lexeme::Ellipsis, Lexeme::Eof]);
    assert_eq!(lexemes(":=>"), vec![Lexeme::ColonFatArrow, Lexeme::Eof]);
    assert_eq!(
        lexemes("a&&b||c"),
        vec![
            Lexeme::Identifier,
            Lexeme::And,
            Lexeme::Identifier,
            Lexeme::Or,
            Lexeme::Identifier,
            Lexeme::Eof
        ]
    );
}

#[test]
fn test_incomplete_operator_prefix_falls_back() {
    assert_eq!(
        lexemes(":=x"),
        vec![Lexeme::Colon, Lexeme::Assignment, Lexeme::Identifier, Lexeme::Eof]
    );
}

#[test]
fn test_operator_trie() {
    assert_eq!(OPERATOR_TRIE.longest_match("->x".chars()), Some((Lexeme::Arrow, 2)));
    assert_eq!(OPERATOR_TRIE.longest_match("@".chars()), None);
    assert!(OPERATOR_TRIE.starts('~'));
    assert!(!OPERATOR_TRIE.starts('#'));
}

#[test]
fn test_tokenize_strings() {
    let (tokens, errors) = tokenize(r#""hello \"world\"" "a{b}""#, None);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].lexeme, Lexeme::String);
    assert_eq!(tokens[0].text, r#""hello \"world\"""#);
    assert_eq!(tokens[1].lexeme, Lexeme::String);
    assert_eq!(tokens[1].text, r#""a{b}""#);
}

#[test]
fn test_unterminated_string() {
    let (tokens, errors) = tokenize("\"abc\nx", None);

    assert_eq!(tokens[0].lexeme, Lexeme::String);
    assert_eq!(tokens[0].text, "\"abc");
    assert_eq!(tokens[1].lexeme, Lexeme::Identifier);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].context, ContextTag::Lexer);
    assert_eq!(errors[0].reason, Reason::MissingEnclosingSymbol);
}

#[test]
fn test_comments_produce_no_tokens() {
    assert_eq!(
        lexemes("a // b c\nd"),
        vec![Lexeme::Identifier, Lexeme::Identifier, Lexeme::Eof]
    );
    assert_eq!(
        lexemes("a / b"),
        vec![Lexeme::Identifier, Lexeme::Slash, Lexeme::Identifier, Lexeme::Eof]
    );
}

#[test]
fn test_locations() {
    let (tokens, _) = tokenize("let x\n  = 5;", None);

    assert_eq!(tokens[0].location, Location::new(0, 0));
    assert_eq!(tokens[1].location, Location::new(0, 4));
    assert_eq!(tokens[2].location, Location::new(1, 2));
    assert_eq!(tokens[3].location, Location::new(1, 4));
    assert_eq!(tokens[4].location, Location::new(1, 5));
}

#[test]
fn test_tab_width_option() {
    let options = Options {
        tab_width: 8,
        ..Options::default()
    };
    let (tokens, _) = tokenize_with("\tx", &options);
    assert_eq!(tokens[0].location, Location::new(0, 8));

    let (tokens, _) = tokenize("\tx", None);
    assert_eq!(tokens[0].location, Location::new(0, 4));
}

#[test]
fn test_unrecognized_characters_are_skipped() {
    let (tokens, errors) = tokenize("a @ b # c", Some("bad.src".to_string()));

    assert_eq!(
        tokens.iter().map(|token| token.lexeme).collect::<Vec<_>>(),
        vec![Lexeme::Identifier, Lexeme::Identifier, Lexeme::Identifier, Lexeme::Eof]
    );
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].reason, Reason::Unknown);
    assert_eq!(errors[0].location, Location::new(0, 2));
    assert_eq!(errors[0].file, "bad.src");
    assert_eq!(errors[1].location, Location::new(0, 6));
}

#[test]
fn test_empty_source() {
    let (tokens, errors) = tokenize("", None);

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].lexeme, Lexeme::Eof);
    assert!(errors.is_empty());
}
