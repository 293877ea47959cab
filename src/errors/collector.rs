use std::slice::Iter;

use super::errors::Diagnostic;

/// Order-preserving accumulator of diagnostics.
///
/// One collector lives in every parse context; a committed context appends its
/// collector to its parent's, a backtracked one clears it.
#[derive(Debug, Default, Clone)]
pub struct ErrorCollector {
    diagnostics: Vec<Diagnostic>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        ErrorCollector::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Moves every diagnostic of `other` to the end of this collector.
    pub fn append(&mut self, other: &mut ErrorCollector) {
        self.diagnostics.append(&mut other.diagnostics);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Drops everything collected, returning how many diagnostics were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.diagnostics.len();
        self.diagnostics.clear();
        discarded
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
