//! Unit tests for error handling.
//!
//! This module contains tests for diagnostic messages, formatting, the
//! collector and the fatal error type.

use crate::errors::{
    collector::ErrorCollector,
    errors::{render_diagnostic, render_message, ContextTag, Diagnostic, Error, Reason},
};
use crate::Location;

fn diagnostic(context: ContextTag, reason: Reason, line: u32, column: u32) -> Diagnostic {
    Diagnostic::new(context, reason, "test.src", Location::new(line, column))
}

#[test]
fn test_missing_enclosing_symbol_messages() {
    assert_eq!(
        render_message(ContextTag::Tuple, Reason::MissingEnclosingSymbol),
        "Missing ')'"
    );
    assert_eq!(
        render_message(ContextTag::Array, Reason::MissingEnclosingSymbol),
        "Missing ']'"
    );
    assert_eq!(
        render_message(ContextTag::Block, Reason::MissingEnclosingSymbol),
        "Missing enclosing block."
    );
}

#[test]
fn test_context_specialised_messages() {
    assert_eq!(
        render_message(ContextTag::ModuleDecl, Reason::MissingDecl),
        "Missing module declaration."
    );
    assert_eq!(
        render_message(ContextTag::Declaration, Reason::MissingSymbol),
        "Missing ';' after let statement."
    );
    assert_eq!(
        render_message(ContextTag::Lexer, Reason::Unknown),
        "Unrecognized character."
    );
    assert_eq!(
        render_message(ContextTag::Defer, Reason::RestrictedAction),
        "Cannot defer a return or another defer."
    );
    assert_eq!(
        render_message(ContextTag::Tuple, Reason::NestingTooDeep),
        "Too deeply nested tuple."
    );
    assert_eq!(
        render_message(ContextTag::Call, Reason::MissingExpr),
        "Expected an expression in call."
    );
}

#[test]
fn test_message_is_pure() {
    let first = diagnostic(ContextTag::Loop, Reason::MissingBody, 0, 0);
    let second = diagnostic(ContextTag::Loop, Reason::MissingBody, 9, 3);
    assert_eq!(first.message(), second.message());
}

#[test]
fn test_diagnostic_display() {
    let error = diagnostic(ContextTag::Return, Reason::MissingSymbol, 4, 11);

    assert_eq!(
        error.to_string(),
        "test.src:5:12: error: Missing ';' after return statement."
    );
    assert_eq!(error.get_reason_name(), "MissingSymbol");
    assert_eq!(error.get_location(), Location::new(4, 11));
}

#[test]
fn test_render_diagnostic_points_at_column() {
    let source = "module app;\n    let a = 5\n";
    let error = diagnostic(ContextTag::Declaration, Reason::MissingSymbol, 1, 13);
    let rendered = render_diagnostic(&error, source, 4);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[0], "error: Missing ';' after let statement.");
    assert_eq!(lines[1], "-> test.src");
    assert_eq!(lines[2], "  |");
    assert_eq!(lines[3], "2 | let a = 5");
    assert_eq!(lines[4], "  | ---------^");
}

#[test]
fn test_render_diagnostic_expands_tabs() {
    let source = "fn f() {\n\tlet x\t= 5\n}\n";
    let error = diagnostic(ContextTag::Declaration, Reason::MissingSymbol, 1, 15);
    let rendered = render_diagnostic(&error, source, 4);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines[3], "2 | let x   = 5");
    assert_eq!(lines[4], "  | -----------^");
}

#[test]
fn test_render_diagnostic_past_end_of_source() {
    let error = diagnostic(ContextTag::TranslationUnit, Reason::Unknown, 10, 0);
    let rendered = render_diagnostic(&error, "", 4);
    assert!(rendered.contains("11 | "));
}

#[test]
fn test_collector_preserves_order() {
    let mut collector = ErrorCollector::new();
    collector.emit(diagnostic(ContextTag::Tuple, Reason::MissingExpr, 0, 1));
    collector.emit(diagnostic(ContextTag::Tuple, Reason::MissingEnclosingSymbol, 0, 5));

    let mut parent = ErrorCollector::new();
    parent.emit(diagnostic(ContextTag::Block, Reason::MissingStmt, 0, 0));
    parent.append(&mut collector);

    assert!(collector.is_empty());
    let reasons: Vec<Reason> = parent.iter().map(|error| error.reason).collect();
    assert_eq!(
        reasons,
        vec![
            Reason::MissingStmt,
            Reason::MissingExpr,
            Reason::MissingEnclosingSymbol
        ]
    );
}

#[test]
fn test_collector_clear_reports_discarded() {
    let mut collector = ErrorCollector::new();
    collector.extend(vec![
        diagnostic(ContextTag::Type, Reason::MissingType, 0, 0),
        diagnostic(ContextTag::Type, Reason::MissingType, 0, 2),
    ]);

    assert_eq!(collector.len(), 2);
    assert_eq!(collector.clear(), 2);
    assert!(collector.into_vec().is_empty());
}

#[test]
fn test_fatal_error_messages() {
    let error = Error::CheckpointOrder {
        expected: 3,
        found: 2,
    };
    assert_eq!(
        error.to_string(),
        "checkpoint released out of order: expected depth 3, found 2"
    );

    let error = Error::Diagnostics(vec![diagnostic(ContextTag::Match, Reason::MissingExpr, 0, 0)]);
    assert_eq!(error.to_string(), "source has 1 diagnostic(s)");

    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: Error = io.into();
    assert!(matches!(error, Error::Io(_)));
}
