//! Character-level input for the lexer.
//!
//! [`TextStream`] owns the decoded source and a [`LocationTracker`] that keeps
//! the line/column of the cursor in step with a monotonically increasing
//! character position.

use crate::Location;

/// Line/column bookkeeping for a character cursor.
#[derive(Debug, Clone)]
pub struct LocationTracker {
    position: usize,
    line: u32,
    column: u32,
    tab_width: u32,
}

impl LocationTracker {
    pub fn new(tab_width: u32) -> Self {
        LocationTracker {
            position: 0,
            line: 0,
            column: 0,
            tab_width: tab_width.max(1),
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Characters consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    fn column(&mut self) {
        self.column += 1;
    }

    fn tab(&mut self) {
        self.column = (self.column / self.tab_width + 1) * self.tab_width;
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

pub struct TextStream {
    chars: Vec<char>,
    cursor: usize,
    tracker: LocationTracker,
}

impl TextStream {
    pub fn new(source: &str, tab_width: u32) -> Self {
        TextStream {
            chars: source.chars().collect(),
            cursor: 0,
            tracker: LocationTracker::new(tab_width),
        }
    }

    /// The character under the cursor, i.e. the next one `advance` consumes.
    pub fn current(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    /// The character after `current`.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.cursor + 1).copied()
    }

    pub fn done(&self) -> bool {
        self.cursor >= self.chars.len()
    }

    pub fn location(&self) -> Location {
        self.tracker.location()
    }

    pub fn position(&self) -> usize {
        self.tracker.position()
    }

    pub fn remainder(&self) -> &[char] {
        &self.chars[self.cursor.min(self.chars.len())..]
    }

    /// Source text between character position `start` and the cursor.
    pub fn text_from(&self, start: usize) -> String {
        self.chars[start..self.cursor].iter().collect()
    }

    pub fn advance(&mut self) {
        let Some(c) = self.current() else {
            return;
        };
        self.cursor += 1;

        match c {
            '\t' => self.tracker.tab(),
            '\r' => {
                self.skip_raw_line();
                self.tracker.newline();
            }
            '\n' => self.tracker.newline(),
            _ => self.tracker.column(),
        }

        self.tracker.position = self.cursor;
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Advances iff the current character is `c`.
    pub fn match_char(&mut self, c: char) -> bool {
        self.match_if(|current| current == c)
    }

    /// Advances iff the current character is one of `chars`.
    pub fn match_any(&mut self, chars: &[char]) -> bool {
        self.match_if(|current| chars.contains(&current))
    }

    /// Advances iff the current character satisfies `predicate`.
    pub fn match_if(&mut self, predicate: impl Fn(char) -> bool) -> bool {
        match self.current() {
            Some(c) if predicate(c) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Consumes everything up to and including the next line break.
    pub fn skip_line(&mut self) {
        while let Some(c) = self.current() {
            self.advance();
            if c == '\n' || c == '\r' {
                break;
            }
        }
    }

    // Underlying source primitive: drops the rest of the line without column bookkeeping.
    fn skip_raw_line(&mut self) {
        while let Some(c) = self.chars.get(self.cursor) {
            self.cursor += 1;
            if *c == '\n' {
                break;
            }
        }
    }
}
