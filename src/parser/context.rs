//! Parse contexts: the backtracking and error-scoping unit every grammar
//! handler receives.
//!
//! A context takes a token stream checkpoint when it is created and owns an
//! [`ErrorCollector`] for the diagnostics emitted while it is live. Dropping a
//! context commits it: the checkpoint is released and its diagnostics move to
//! the parent (or to the per-parse sink at the root). Backtracking restores the
//! stream to the checkpoint and throws the diagnostics away, so a failed
//! alternative leaves no trace.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use tracing::trace;

use crate::{
    ast::ast::{Node, Visibility},
    errors::{
        collector::ErrorCollector,
        errors::{ContextTag, Diagnostic, Error, Reason},
    },
    lexer::tokens::{Lexeme, Token},
    Location,
};

use super::stream::TokenStream;

/// Longest chain of live contexts a parse builds before nested input is skipped.
pub const MAX_DEPTH: usize = 256;

/// State shared by every context of one parse.
pub struct ParseState {
    file: Rc<String>,
    stream: RefCell<TokenStream>,
    sink: RefCell<ErrorCollector>,
    fatal: RefCell<Option<Error>>,
}

impl ParseState {
    pub fn new(file: Rc<String>, tokens: Vec<Token>) -> Self {
        ParseState {
            file,
            stream: RefCell::new(TokenStream::new(tokens)),
            sink: RefCell::new(ErrorCollector::new()),
            fatal: RefCell::new(None),
        }
    }

    pub fn file(&self) -> Rc<String> {
        Rc::clone(&self.file)
    }

    /// Records the first invariant violation; later ones are dropped.
    pub fn fail(&self, error: Error) {
        let mut fatal = self.fatal.borrow_mut();
        if fatal.is_none() {
            *fatal = Some(error);
        }
    }

    /// Diagnostics that reached the sink, or the invariant violation that aborted the parse.
    pub fn finish(self) -> Result<Vec<Diagnostic>, Error> {
        if let Some(error) = self.fatal.into_inner() {
            return Err(error);
        }

        Ok(self.sink.into_inner().into_vec())
    }
}

pub struct ParseContext<'p> {
    state: &'p ParseState,
    parent: Option<&'p ParseContext<'p>>,
    tag: Cell<ContextTag>,
    location: Location,
    checkpoint: usize,
    depth: usize,
    subroutine: bool,
    precedence: Option<u8>,
    visibility: Option<Visibility>,
    errors: RefCell<ErrorCollector>,
    backtracked: Cell<bool>,
}

impl<'p> ParseContext<'p> {
    fn create(
        state: &'p ParseState,
        parent: Option<&'p ParseContext<'p>>,
        tag: ContextTag,
        subroutine: bool,
        precedence: Option<u8>,
        visibility: Option<Visibility>,
    ) -> Self {
        let (checkpoint, location) = {
            let mut stream = state.stream.borrow_mut();
            (stream.mark_backtrack(), stream.location())
        };

        ParseContext {
            state,
            parent,
            tag: Cell::new(tag),
            location,
            checkpoint,
            depth: parent.map_or(0, |parent| parent.depth + 1),
            subroutine,
            precedence,
            visibility,
            errors: RefCell::new(ErrorCollector::new()),
            backtracked: Cell::new(false),
        }
    }

    /// The outermost context of a parse; its diagnostics flush to the state's sink.
    pub fn root(state: &'p ParseState, tag: ContextTag) -> Self {
        ParseContext::create(state, None, tag, false, None, None)
    }

    /// Derives a child sharing this context's stream and inheriting its optional fields.
    pub fn enter(&'p self, tag: ContextTag) -> ParseContext<'p> {
        ParseContext::create(
            self.state,
            Some(self),
            tag,
            self.subroutine,
            self.precedence,
            self.visibility,
        )
    }

    pub fn enter_with_precedence(&'p self, tag: ContextTag, precedence: u8) -> ParseContext<'p> {
        ParseContext::create(
            self.state,
            Some(self),
            tag,
            self.subroutine,
            Some(precedence),
            self.visibility,
        )
    }

    pub fn enter_with_visibility(
        &'p self,
        tag: ContextTag,
        visibility: Visibility,
    ) -> ParseContext<'p> {
        ParseContext::create(
            self.state,
            Some(self),
            tag,
            self.subroutine,
            self.precedence,
            Some(visibility),
        )
    }

    /// Parses a nested fragment over its own token stream; diagnostics still bubble here.
    pub fn subroutine(&'p self, state: &'p ParseState, tag: ContextTag) -> ParseContext<'p> {
        ParseContext::create(state, Some(self), tag, true, None, self.visibility)
    }

    pub fn tag(&self) -> ContextTag {
        self.tag.get()
    }

    /// Re-tags the context once the production has been disambiguated.
    pub fn to(&self, tag: ContextTag) {
        self.tag.set(tag);
    }

    /// Location of the first token this context saw.
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn is_subroutine(&self) -> bool {
        self.subroutine
    }

    /// Number of enclosing contexts, counted across subroutines.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn precedence(&self) -> Option<u8> {
        self.precedence
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.visibility
    }

    pub fn file(&self) -> Rc<String> {
        self.state.file()
    }

    pub fn state(&self) -> &'p ParseState {
        self.state
    }

    /// Records an invariant violation on the parse this context belongs to.
    ///
    /// A subroutine's own state is discarded after it runs, so its failures
    /// are handed to the enclosing parse.
    pub fn fail(&self, error: Error) {
        match self.parent {
            Some(parent) if self.is_subroutine() => parent.fail(error),
            _ => self.state.fail(error),
        }
    }

    // Token stream access

    pub fn peek(&self) -> Token {
        self.state.stream.borrow().peek().clone()
    }

    pub fn peek_lexeme(&self) -> Lexeme {
        self.state.stream.borrow().peek().lexeme
    }

    pub fn current(&self) -> Token {
        self.state.stream.borrow().current().clone()
    }

    /// Location of the token at the cursor.
    pub fn here(&self) -> Location {
        self.state.stream.borrow().location()
    }

    pub fn at_end(&self) -> bool {
        self.state.stream.borrow().is_done()
    }

    pub fn match_one(&self, lexeme: Lexeme) -> bool {
        self.match_any(&[lexeme])
    }

    pub fn match_any(&self, lexemes: &[Lexeme]) -> bool {
        self.state.stream.borrow_mut().match_any(lexemes)
    }

    pub fn advance(&self) {
        self.state.stream.borrow_mut().advance();
    }

    pub fn skip_until(&self, sync: &[Lexeme]) -> usize {
        self.state.stream.borrow_mut().skip_until(sync)
    }

    // Backtracking

    fn release(&self, restore: bool) -> Result<(), Error> {
        let mut stream = self.state.stream.borrow_mut();
        if stream.depth() != self.checkpoint {
            return Err(Error::CheckpointOrder {
                expected: self.checkpoint,
                found: stream.depth(),
            });
        }

        if restore {
            stream.backtrack()
        } else {
            stream.remove_backtrack()
        }
    }

    /// Restores the stream to this context's checkpoint and drops its diagnostics.
    ///
    /// Idempotent; once backtracked the context no longer commits on drop.
    pub fn backtrack(&self) {
        if self.backtracked.replace(true) {
            return;
        }

        if let Err(error) = self.release(true) {
            self.fail(error);
        }

        let discarded = self.errors.borrow_mut().clear();
        trace!(context = %self.tag(), discarded, "backtrack");
    }

    /// Backtracks iff `condition` holds and returns it.
    pub fn backtrack_if(&self, condition: bool) -> bool {
        if condition {
            self.backtrack();
        }
        condition
    }

    pub fn is_backtracked(&self) -> bool {
        self.backtracked.get()
    }

    // Diagnostics

    /// Records a diagnostic stamped with this context's tag and the cursor location.
    pub fn emit(&self, reason: Reason) {
        self.emit_at(reason, self.here());
    }

    pub fn emit_at(&self, reason: Reason, location: Location) {
        let diagnostic = Diagnostic::new(self.tag(), reason, &self.state.file, location);
        self.errors.borrow_mut().emit(diagnostic);
    }

    /// Adds diagnostics produced elsewhere (nested lexing) to this context.
    pub fn record(&self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.errors.borrow_mut().extend(diagnostics);
    }

    pub fn emit_if(&self, condition: bool, reason: Reason) -> bool {
        if condition {
            self.emit(reason);
        }
        condition
    }

    pub fn emit_if_node_missing(&self, node: &Option<Node>, reason: Reason) -> bool {
        let missing = matches!(node, None | Some(Node::Missing(_)));
        self.emit_if(missing, reason)
    }

    /// Matches `lexeme`, emitting `reason` when it is absent. Returns whether it was absent.
    pub fn emit_if_lexeme_not_present(&self, lexeme: Lexeme, reason: Reason) -> bool {
        let absent = !self.match_one(lexeme);
        self.emit_if(absent, reason)
    }

    /// Unwraps a required child, substituting a `Missing` node and a diagnostic when absent.
    pub fn require(&self, node: Option<Node>, reason: Reason) -> Node {
        match node {
            Some(node) => node,
            None => {
                self.emit(reason);
                self.missing()
            }
        }
    }

    pub fn missing(&self) -> Node {
        Node::Missing(self.here())
    }

    /// Once the context chain reaches [`MAX_DEPTH`], reports the construct at
    /// the cursor and skips to the end of the group enclosing it.
    ///
    /// Returns the `Missing` node standing in for the skipped input.
    pub fn skip_if_too_deep(&self) -> Option<Node> {
        if self.depth < MAX_DEPTH {
            return None;
        }

        let missing = self.missing();
        self.emit(Reason::NestingTooDeep);
        let skipped = self.skip_until(&[]);
        trace!(context = %self.tag(), depth = self.depth, skipped, "nesting too deep");

        Some(missing)
    }

    pub fn diagnostic_count(&self) -> usize {
        self.errors.borrow().len()
    }
}

impl Drop for ParseContext<'_> {
    fn drop(&mut self) {
        if self.backtracked.get() {
            return;
        }

        if let Err(error) = self.release(false) {
            self.fail(error);
        }

        let errors = self.errors.get_mut();
        match self.parent {
            Some(parent) => parent.errors.borrow_mut().append(errors),
            None => self.state.sink.borrow_mut().append(errors),
        }
    }
}
