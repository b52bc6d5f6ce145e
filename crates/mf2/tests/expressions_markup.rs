//! Integration tests for options, attributes, annotations and markup.

use mf2::model::{
    Annotation, Expression, Identifier, Literal, Markup, MarkupKind, Operand, Placeholder,
    ReservedAnnotation, VariableName,
};
use mf2::{ErrorKind, ErrorCategory, PatternPart, parse};

fn placeholders(source: &str) -> Vec<Placeholder> {
    parse(source)
        .unwrap()
        .model
        .pattern()
        .unwrap()
        .placeholders()
        .cloned()
        .collect()
}

fn expression(source: &str) -> Expression {
    match placeholders(source).remove(0) {
        Placeholder::Expression(expression) => expression,
        Placeholder::Markup(markup) => panic!("expected expression, got {markup:?}"),
    }
}

fn markup(source: &str) -> Markup {
    match placeholders(source).remove(0) {
        Placeholder::Markup(markup) => markup,
        Placeholder::Expression(expression) => panic!("expected markup, got {expression:?}"),
    }
}

fn number(value: &str) -> Operand {
    Operand::Literal(Literal::unquoted(value))
}

// =============================================================================
// Options
// =============================================================================

#[test]
fn test_function_options() {
    let expression = expression("{$n :number minimumFractionDigits=2 style=$s}");
    let options = &expression.operator().unwrap().options;
    assert_eq!(options.len(), 2);
    assert_eq!(
        options.get(&Identifier::new("minimumFractionDigits")),
        Some(&number("2"))
    );
    assert_eq!(
        options.get(&Identifier::new("style")),
        Some(&Operand::Variable(VariableName("s".into())))
    );
}

#[test]
fn test_option_whitespace_around_equals() {
    let expression = expression("{:f a = 1}");
    assert_eq!(
        expression.operator().unwrap().options.get(&Identifier::new("a")),
        Some(&number("1"))
    );
}

#[test]
fn test_duplicate_option_is_fatal_at_second_name() {
    let err = parse("{:foo a=1 a=2}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateOption { name: "a".into() });
    assert_eq!(err.offset, 10);
    assert_eq!(err.column, 11);
}

#[test]
fn test_namespaced_function_and_option() {
    let expression = expression("{$x :icu:number u:locale=en}");
    let operator = expression.operator().unwrap();
    assert_eq!(operator.name.0, Identifier::namespaced("icu", "number"));
    assert_eq!(
        operator.options.get(&Identifier::namespaced("u", "locale")),
        Some(&Operand::Literal(Literal::unquoted("en")))
    );
}

#[test]
fn test_option_requires_operand() {
    let err = parse("{:f a=}").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedCharacter {
            found: '}',
            expected: mf2::parser::Expected::Operand,
        }
    );
    assert_eq!(err.offset, 6);
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_duplicate_attributes_are_kept() {
    let expression = expression("{|x| @a=1 @a=2}");
    let attributes: Vec<_> = expression.attributes.iter().cloned().collect();
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].name, Identifier::new("a"));
    assert_eq!(attributes[1].name, Identifier::new("a"));
    assert_eq!(attributes[0].value, Some(number("1")));
    assert_eq!(attributes[1].value, Some(number("2")));
}

#[test]
fn test_attribute_without_value() {
    let expression = expression("{$x :number @translate=no @locked}");
    let attributes: Vec<_> = expression.attributes.iter().cloned().collect();
    assert_eq!(attributes[0].value, Some(Operand::Literal(Literal::unquoted("no"))));
    assert_eq!(attributes[1].name, Identifier::new("locked"));
    assert_eq!(attributes[1].value, None);
}

#[test]
fn test_attribute_value_must_be_literal() {
    let err = parse("{$x @a=$y}").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedCharacter {
            found: '$',
            expected: mf2::parser::Expected::Literal,
        }
    );
    assert_eq!(err.offset, 7);
}

#[test]
fn test_attribute_requires_whitespace() {
    let err = parse("{$x@a}").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedCharacter {
            found: '@',
            expected: mf2::parser::Expected::Token("}"),
        }
    );
    assert_eq!(err.offset, 3);
}

// =============================================================================
// Annotations
// =============================================================================

#[test]
fn test_annotation_requires_whitespace_after_operand() {
    let err = parse("{$x:number}").unwrap_err();
    assert_eq!(err.offset, 3);
}

#[test]
fn test_empty_expression_is_fatal() {
    let err = parse("{ }").unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnexpectedCharacter {
            found: '}',
            expected: mf2::parser::Expected::OperandOrAnnotation,
        }
    );
    assert_eq!(err.offset, 2);
}

#[test]
fn test_reserved_annotation_is_recoverable() {
    let parsed = parse("{$x ^private body}").unwrap();
    let expression = match parsed.model.pattern().unwrap().parts.as_slice() {
        [PatternPart::Placeholder(Placeholder::Expression(expression))] => expression.clone(),
        other => panic!("unexpected parts {other:?}"),
    };
    assert_eq!(
        expression.annotation,
        Some(Annotation::Reserved(ReservedAnnotation {
            sigil: '^',
            body: Some("private body".into()),
        }))
    );
    assert_eq!(parsed.errors.len(), 1);
    assert_eq!(parsed.errors[0].category(), ErrorCategory::Unsupported);
    assert_eq!(parsed.errors[0].kind, ErrorKind::UnsupportedAnnotation { sigil: '^' });
    assert_eq!(parsed.errors[0].offset, 4);
}

#[test]
fn test_reserved_annotation_without_body() {
    let expression = expression("{!}");
    assert_eq!(
        expression.annotation,
        Some(Annotation::Reserved(ReservedAnnotation {
            sigil: '!',
            body: None,
        }))
    );
}

#[test]
fn test_reserved_annotation_body_with_escapes_and_literals() {
    let expression = expression(r"{%a \{ |b c| @x}");
    assert_eq!(
        expression.annotation,
        Some(Annotation::Reserved(ReservedAnnotation {
            sigil: '%',
            body: Some(r"a \{ |b c|".into()),
        }))
    );
    assert_eq!(expression.attributes.len(), 1);
}

// =============================================================================
// Markup
// =============================================================================

#[test]
fn test_open_markup_with_options() {
    let markup = markup("{#link href=|https://example.com| @rel=x}text");
    assert_eq!(markup.kind, MarkupKind::Open);
    assert_eq!(markup.name, Identifier::new("link"));
    assert_eq!(
        markup.options.get(&Identifier::new("href")),
        Some(&Operand::Literal(Literal::quoted("https://example.com")))
    );
    assert_eq!(markup.attributes.len(), 1);
}

#[test]
fn test_close_and_standalone_markup() {
    let parts = placeholders("{#b}bold{/b}{#br/}{ #img src=a.png /}");
    let kinds: Vec<_> = parts
        .iter()
        .map(|p| match p {
            Placeholder::Markup(markup) => markup.kind,
            Placeholder::Expression(_) => panic!("expected markup"),
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            MarkupKind::Open,
            MarkupKind::Close,
            MarkupKind::Standalone,
            MarkupKind::Standalone,
        ]
    );
}

#[test]
fn test_close_markup_with_attributes() {
    let markup = markup("{/b @a}");
    assert_eq!(markup.kind, MarkupKind::Close);
    assert!(markup.options.is_empty());
    assert_eq!(markup.attributes.len(), 1);
}

#[test]
fn test_close_markup_rejects_options() {
    let err = parse("{/b x=1}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::OptionsOnClose);
    assert_eq!(err.offset, 4);
}

#[test]
fn test_markup_duplicate_option() {
    let err = parse("{#a x=1 x=2}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateOption { name: "x".into() });
    assert_eq!(err.offset, 8);
}

#[test]
fn test_namespaced_markup() {
    let markup = markup("{#html:p}");
    assert_eq!(markup.name, Identifier::namespaced("html", "p"));
}
