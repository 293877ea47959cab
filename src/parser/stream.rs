//! Materialized token sequence with a cursor and nested backtrack checkpoints.

use crate::{
    errors::errors::Error,
    lexer::tokens::{Lexeme, Token},
    Location, MK_TOKEN,
};

pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
    marks: Vec<usize>,
    /// Answer for any lookahead past the last token.
    end: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let end_location = tokens
            .last()
            .map(|token| token.location)
            .unwrap_or_default();

        TokenStream {
            tokens,
            cursor: 0,
            marks: vec![],
            end: MK_TOKEN!(Lexeme::Eof, String::new(), end_location),
        }
    }

    /// The token at the cursor, or the `Eof` sentinel.
    pub fn peek(&self) -> &Token {
        self.tokens.get(self.cursor).unwrap_or(&self.end)
    }

    /// The last token matched.
    pub fn current(&self) -> &Token {
        self.cursor
            .checked_sub(1)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&self.end)
    }

    pub fn location(&self) -> Location {
        self.peek().location
    }

    pub fn is_done(&self) -> bool {
        self.peek().lexeme == Lexeme::Eof
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Advances past the token at the cursor iff it is one of `lexemes`.
    pub fn match_any(&mut self, lexemes: &[Lexeme]) -> bool {
        let lexeme = self.peek().lexeme;
        if lexeme == Lexeme::Eof || !lexemes.contains(&lexeme) {
            return false;
        }

        self.cursor += 1;
        true
    }

    /// Unconditionally steps over one token; a no-op at the end.
    pub fn advance(&mut self) {
        if !self.is_done() {
            self.cursor += 1;
        }
    }

    /// Skips tokens until one of `sync` (or a `;`) is reached at bracket depth
    /// zero, an unmatched closing bracket is seen, or the input ends.
    ///
    /// Returns how many tokens were skipped.
    pub fn skip_until(&mut self, sync: &[Lexeme]) -> usize {
        let mut depth = 0usize;
        let mut skipped = 0;

        loop {
            let lexeme = self.peek().lexeme;
            if lexeme == Lexeme::Eof {
                break;
            }
            if depth == 0 && (sync.contains(&lexeme) || lexeme == Lexeme::Semicolon) {
                break;
            }

            match lexeme {
                Lexeme::OpenParen | Lexeme::OpenBracket | Lexeme::OpenCurly => depth += 1,
                Lexeme::CloseParen | Lexeme::CloseBracket | Lexeme::CloseCurly => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }

            self.cursor += 1;
            skipped += 1;
        }

        skipped
    }

    /// Pushes the cursor as a checkpoint and returns the new checkpoint depth.
    pub fn mark_backtrack(&mut self) -> usize {
        self.marks.push(self.cursor);
        self.marks.len()
    }

    /// Restores the cursor to the most recent checkpoint and pops it.
    pub fn backtrack(&mut self) -> Result<(), Error> {
        let mark = self.marks.pop().ok_or(Error::CheckpointUnderflow)?;
        self.cursor = mark;
        Ok(())
    }

    /// Pops the most recent checkpoint, keeping everything matched since.
    pub fn remove_backtrack(&mut self) -> Result<(), Error> {
        self.marks.pop().ok_or(Error::CheckpointUnderflow)?;
        Ok(())
    }

    pub fn depth(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lexer::tokenize;

    fn stream(source: &str) -> TokenStream {
        let (tokens, _) = tokenize(source, None);
        TokenStream::new(tokens)
    }

    #[test]
    fn test_match_and_current() {
        let mut tokens = stream("a + b");
        assert!(!tokens.match_any(&[Lexeme::Plus]));
        assert!(tokens.match_any(&[Lexeme::Identifier]));
        assert_eq!(tokens.current().text, "a");
        assert_eq!(tokens.peek().lexeme, Lexeme::Plus);
    }

    #[test]
    fn test_nested_backtracking() {
        let mut tokens = stream("a b c d");
        tokens.mark_backtrack();
        tokens.advance();
        tokens.mark_backtrack();
        tokens.advance();
        tokens.advance();
        tokens.backtrack().unwrap();
        assert_eq!(tokens.peek().text, "b");
        tokens.remove_backtrack().unwrap();
        assert_eq!(tokens.peek().text, "b");
        assert_eq!(tokens.depth(), 0);
    }

    #[test]
    fn test_backtrack_without_mark_is_an_error() {
        let mut tokens = stream("a");
        assert!(matches!(tokens.backtrack(), Err(Error::CheckpointUnderflow)));
        assert!(matches!(tokens.remove_backtrack(), Err(Error::CheckpointUnderflow)));
    }

    #[test]
    fn test_out_of_range_lookahead_is_eof() {
        let mut tokens = TokenStream::new(vec![]);
        assert_eq!(tokens.peek().lexeme, Lexeme::Eof);
        assert!(!tokens.match_any(&[Lexeme::Eof]));
        tokens.advance();
        assert!(tokens.is_done());
    }

    #[test]
    fn test_skip_until_respects_nesting() {
        let mut tokens = stream("x (a, b) , c");
        assert_eq!(tokens.skip_until(&[Lexeme::Comma]), 6);
        assert_eq!(tokens.peek().lexeme, Lexeme::Comma);

        let mut tokens = stream("x y ) z");
        assert_eq!(tokens.skip_until(&[Lexeme::Comma]), 2);
        assert_eq!(tokens.peek().lexeme, Lexeme::CloseParen);
    }
}
