//! Integration tests for the normalized output.

use insta::assert_snapshot;
use mf2::parse;

fn normalize(source: &str) -> String {
    parse(source).unwrap().normalized
}

// =============================================================================
// Canonical forms
// =============================================================================

#[test]
fn test_simple_message_is_quoted() {
    assert_snapshot!(normalize("Hello, {$name}!"), @"{{Hello, {$name}!}}");
}

#[test]
fn test_simple_message_keeps_text_whitespace() {
    assert_snapshot!(normalize("  a   b  "), @"{{  a   b  }}");
}

#[test]
fn test_whitespace_runs_collapse() {
    assert_eq!(
        normalize("  .local   $x   =   {1}\n\n{{hi {  $x  }}}"),
        " .local $x = {1} {{hi { $x }}}"
    );
}

#[test]
fn test_matcher_layout() {
    assert_snapshot!(
        normalize(".match {$x   :number}\n  one   {{1}}\n  *   {{other}}"),
        @".match {$x :number} one {{1}} * {{other}}"
    );
}

#[test]
fn test_quoted_literals_are_reescaped() {
    assert_snapshot!(normalize(r"{|a\{b\|c\\d|}"), @r"{{{|a{b\|c\\d|}}}");
}

#[test]
fn test_pattern_escapes_kept() {
    assert_snapshot!(normalize(r"\{x\} \\"), @r"{{\{x\} \\}}");
}

#[test]
fn test_options_and_attributes() {
    assert_snapshot!(
        normalize("{$n :number  style = percent   @a = |1|  @b}"),
        @"{{{$n :number style = percent @a = |1| @b}}}"
    );
}

#[test]
fn test_markup() {
    assert_snapshot!(normalize("{ #b }x{ /b }{#br /}"), @"{{{ #b }x{ /b }{#br /}}}");
}

#[test]
fn test_bidi_marks_are_preserved() {
    assert_eq!(
        normalize(".local\u{200E}\t\t$x = {1} {{}}"),
        ".local\u{200E} $x = {1} {{}}"
    );
    assert_eq!(normalize("{\u{200F}$x\u{200F}}"), "{{{\u{200F}$x\u{200F}}}}");
}

#[test]
fn test_bidi_marks_around_names_are_preserved() {
    assert_eq!(normalize("{$\u{200E}x}"), "{{{$\u{200E}x}}}");
    assert_eq!(
        normalize(".local $\u{200E}x = {1} {{}}"),
        ".local $\u{200E}x = {1} {{}}"
    );
    assert_eq!(
        normalize("{:\u{200F}number\u{200F}}"),
        "{{{:\u{200F}number\u{200F}}}}"
    );
}

#[test]
fn test_crlf_is_collapsed() {
    assert_snapshot!(normalize(".input {$x}\r\n{{}}"), @".input {$x} {{}}");
}

// =============================================================================
// Idempotence
// =============================================================================

#[test]
fn test_normalized_output_reparses_to_equal_model() {
    let messages = [
        "",
        "Hello, {$name}!",
        "  leading and trailing  ",
        r"a \{ b \} c \\",
        "{|x| @a=1 @a=2}",
        "{$n :number minimumFractionDigits=2}",
        "{#link href=|a b|}text{/link}",
        ".local $x = {|hello|} {{{$x}}}",
        ".input {$count :number}\n.match {$count}\none {{One}}\n* {{{$count} items}}",
        ".match {$a} {$b}\n|x| 1 {{x1}}\n* * {{other}}",
        ".when |x| {$y} {{hi}}",
        "{$x ^private  body   here}",
        "{{oops } here}}",
        "{|a\\|b|}",
        "{$\u{200E}x}",
        ".local $\u{200E}x = {1} {{{$x}}}",
        "{#\u{2066}b\u{2069} @\u{200F}id}",
    ];
    for message in messages {
        let first = parse(message).unwrap();
        let second = parse(&first.normalized).unwrap();
        assert_eq!(first.model, second.model, "model of {message:?}");
        assert_eq!(first.normalized, second.normalized, "normalized {message:?}");
    }
}
