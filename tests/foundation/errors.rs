//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use argot_foundation::{Error, ErrorContext, ErrorKind, ValueType};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_duplicate_alias() {
    let err = Error::duplicate_alias("-v");
    assert!(matches!(err.kind, ErrorKind::DuplicateAlias(ref a) if a == "-v"));
    assert!(format!("{err}").contains("-v"));
}

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(ValueType::Int, ValueType::String);
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(format!("{err}"), "type mismatch: expected int, got string");
}

#[test]
fn error_materialization_lists_arguments() {
    let err = Error::materialization("count", vec!["x".into(), "y".into()], "not a number");
    let msg = format!("{err}");
    assert!(msg.contains("'count'"));
    assert!(msg.contains("x, y"));
    assert!(msg.ends_with("not a number"));
}

#[test]
fn error_materialization_without_arguments() {
    let err = Error::materialization("count", Vec::new(), "missing");
    assert!(format!("{err}").contains("(none)"));
}

#[test]
fn error_command_not_provided_is_bare_message() {
    let err = Error::command_not_provided("Required command was not provided.");
    assert_eq!(format!("{err}"), "Required command was not provided.");
}

#[test]
fn error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: Error = io.into();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_records_token_and_frames() {
    let err = Error::duplicate_alias("-v").with_context(
        ErrorContext::new()
            .with_token("-v")
            .with_frame("build")
            .with_frame("tool"),
    );
    let context = err.context.unwrap();
    assert_eq!(context.token.as_deref(), Some("-v"));
    assert_eq!(context.path, vec!["build", "tool"]);

    let shown = context.to_string();
    assert!(shown.starts_with("at '-v'"));
    assert!(shown.contains("  in build\n  in tool\n"));
}
