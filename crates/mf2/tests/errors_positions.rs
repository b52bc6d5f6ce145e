//! Integration tests for error positions, context snippets and rendering.

use mf2::{ErrorKind, ParseOptions, Severity, parse, parse_with_options};

// =============================================================================
// Line and column
// =============================================================================

#[test]
fn test_first_line_position() {
    let err = parse("{|abc}").unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.column, 7);
    assert_eq!(err.line_start, 0);
}

#[test]
fn test_position_on_later_line() {
    let source = ".local $x = {1}\n.local $y = {2}\n.local $x = {3}\n{{}}";
    let err = parse(source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateDeclaration { name: "x".into() });
    assert_eq!(err.offset, 39);
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 8);
    assert_eq!(err.line_start, 32);
}

#[test]
fn test_carriage_return_stays_on_line() {
    let err = parse(".local $x = {1}\r\n.local $x = {2} {{}}").unwrap_err();
    assert_eq!(err.line, 2);
    assert_eq!(err.line_start, 17);
    assert_eq!(err.column, 8);
}

#[test]
fn test_multiline_quoted_literal_advances_line() {
    let err = parse("{|a\nb} c").unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnterminatedLiteral);
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 5);
}

#[test]
fn test_supplementary_plane_counts_once() {
    let source = "\u{1F600}{|x}";
    let err = parse(source).unwrap_err();
    assert_eq!(err.offset, 5);
    assert_eq!(err.column, 6);
    assert_eq!(err.byte_offset(source), 8);
}

// =============================================================================
// Context snippets
// =============================================================================

#[test]
fn test_context_snippets() {
    let err = parse("{:foo a=1 a=2}").unwrap_err();
    assert_eq!(err.pre_context, "{:foo a=1 ");
    assert_eq!(err.post_context, "a=2}");
}

#[test]
fn test_context_is_bounded_by_default_length() {
    let source = format!("{}{{:f a=1 a=2}}{}", "x".repeat(40), "y".repeat(40));
    let err = parse(&source).unwrap_err();
    assert_eq!(err.offset, 48);
    assert_eq!(err.pre_context, "xxxxxxx{:f a=1 ");
    assert_eq!(err.post_context, "a=2}yyyyyyyyyyy");
}

#[test]
fn test_context_stays_on_error_line() {
    let err = parse(".local $x = {1}\n.local $x = {2}\n{{}}").unwrap_err();
    assert_eq!(err.pre_context, ".local ");
    assert_eq!(err.post_context, "$x = {2}");
}

#[test]
fn test_custom_context_length() {
    let options = ParseOptions::builder().context_len(3).build();
    let err = parse_with_options("{:foo a=1 a=2}", &options).unwrap_err();
    assert_eq!(err.pre_context, "=1 ");
    assert_eq!(err.post_context, "a=2");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_display() {
    let err = parse("{:foo a=1 a=2}").unwrap_err();
    assert_eq!(err.to_string(), "duplicate option name 'a' at 1:11");
}

#[test]
fn test_fatal_errors_are_fatal() {
    let err = parse("{").unwrap_err();
    assert_eq!(err.severity(), Severity::Fatal);
    assert_eq!(
        err.to_string(),
        "unexpected end of input, expected an operand or annotation at 1:2"
    );
}

#[test]
fn test_error_serializes_to_json() {
    let err = parse("{|abc}").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();
    assert_eq!(json["kind"]["type"], "unterminated_literal");
    assert_eq!(json["offset"], 6);
    assert_eq!(json["line"], 1);
}
