//! Property-based tests for the lexer.
//!
//! These tests use `proptest` to check lexer invariants over generated inputs:
//!
//! 1. **Lexer never panics** and always ends the sequence with `Eof`
//! 2. **Locations increase** from one token to the next
//! 3. **Token positions round-trip** for single-line ASCII input
//! 4. **Lexer is deterministic**
//! 5. **Valid fragments produce no errors**

use proptest::prelude::*;

use super::{lexer::tokenize, tokens::Lexeme};

/// Fragments that lex cleanly on their own and never merge across a space.
const VALID_FRAGMENTS: &[&str] = &[
    "42",
    "3.14",
    "0..5",
    "\"hello\"",
    "\"a{b}c\"",
    "true",
    "x",
    "Point",
    "i64",
    "_",
    "module",
    "fn",
    "(",
    ")",
    "[",
    "]",
    "{",
    "}",
    "<<=",
    ">>",
    ":=>",
    "::",
    "->",
    "=>",
    "...",
    "!=",
    "&&",
    "||",
    "+=",
    ";",
    ",",
    "?",
    "~",
];

fn valid_fragment() -> impl Strategy<Value = String> {
    prop::sample::select(VALID_FRAGMENTS).prop_map(std::string::ToString::to_string)
}

fn valid_line() -> impl Strategy<Value = String> {
    prop::collection::vec(valid_fragment(), 0..24).prop_map(|fragments| fragments.join(" "))
}

proptest! {
    /// Property 1: arbitrary input never panics and always ends in `Eof`.
    #[test]
    fn lexer_never_panics(input in "\\PC{0,400}") {
        let (tokens, _) = tokenize(&input, None);
        prop_assert_eq!(tokens.last().map(|token| token.lexeme), Some(Lexeme::Eof));
        prop_assert_eq!(
            tokens.iter().filter(|token| token.lexeme == Lexeme::Eof).count(),
            1
        );
    }

    /// Property 2: every token consumes input, so locations strictly increase.
    #[test]
    fn locations_increase(input in "[ -~\\t\\n\\r]{0,300}") {
        let (tokens, _) = tokenize(&input, None);
        let (eof, rest) = tokens.split_last().expect("Eof is always present");

        for window in rest.windows(2) {
            prop_assert!(
                window[0].location < window[1].location,
                "{} is not before {} in {:?}",
                window[0],
                window[1],
                input,
            );
        }
        if let Some(last) = rest.last() {
            prop_assert!(last.location <= eof.location);
        }
    }

    /// Property 3: on a single ASCII line, placing each token's text at its
    /// column and padding with spaces rebuilds the source.
    #[test]
    fn positions_round_trip(input in valid_line()) {
        let (tokens, errors) = tokenize(&input, None);
        prop_assert!(errors.is_empty());

        let mut rebuilt = String::new();
        for token in tokens.iter().filter(|token| token.lexeme != Lexeme::Eof) {
            prop_assert_eq!(token.location.line, 0);
            let column = token.location.column as usize;
            prop_assert!(column >= rebuilt.len());
            rebuilt.push_str(&" ".repeat(column - rebuilt.len()));
            rebuilt.push_str(&token.text);
        }

        prop_assert_eq!(rebuilt, input);
    }

    /// Property 4: same input, same tokens and diagnostics.
    #[test]
    fn lexer_deterministic(input in "\\PC{0,200}") {
        let first = tokenize(&input, None);
        let second = tokenize(&input, None);
        prop_assert_eq!(first, second);
    }

    /// Property 5: known-valid fragments lex without diagnostics.
    #[test]
    fn valid_fragments_lex_cleanly(input in valid_fragment()) {
        let (tokens, errors) = tokenize(&input, None);
        prop_assert!(errors.is_empty(), "{:?} produced {:?}", input, errors);
        prop_assert!(tokens.len() >= 2);
    }
}
