//! Parse error types and the per-parse error reporter.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;
use strsim::levenshtein;
use thiserror::Error;

/// What the parser was looking for when it hit an unexpected code point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expected {
    /// A fixed token such as `}` or `.local`.
    Token(&'static str),
    Name,
    Literal,
    Number,
    Variable,
    Operand,
    OperandOrAnnotation,
    MarkupSigil,
    Key,
    Selector,
    Expression,
    Body,
    PatternText,
    QuotedText,
    EndOfInput,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Expected::Token(token) => write!(f, "'{token}'"),
            Expected::Name => f.write_str("a name"),
            Expected::Literal => f.write_str("a literal"),
            Expected::Number => f.write_str("a number"),
            Expected::Variable => f.write_str("a variable"),
            Expected::Operand => f.write_str("a literal or variable"),
            Expected::OperandOrAnnotation => f.write_str("an operand or annotation"),
            Expected::MarkupSigil => f.write_str("'#' or '/'"),
            Expected::Key => f.write_str("a variant key"),
            Expected::Selector => f.write_str("a selector expression"),
            Expected::Expression => f.write_str("an expression"),
            Expected::Body => f.write_str("'{{' or '.match'"),
            Expected::PatternText => f.write_str("pattern text or a placeholder"),
            Expected::QuotedText => f.write_str("quoted text or '|'"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

/// How an error affects the parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The parse stopped at this error.
    Fatal,
    /// The parse continued; the result may contain error nodes.
    Recoverable,
}

/// Error taxonomy reported alongside [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Malformed or missing syntax, or a violated structural invariant.
    Syntax,
    /// An invalid character inside a quoted pattern, replaced by an error node.
    Pattern,
    /// A well-formed construct reserved for future grammar versions.
    Unsupported,
}

/// The kind of a parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: Expected },

    #[error("unexpected character {found:?}, expected {expected}")]
    UnexpectedCharacter { found: char, expected: Expected },

    #[error("missing required whitespace")]
    MissingWhitespace,

    #[error("unterminated quoted literal")]
    UnterminatedLiteral,

    #[error("unterminated quoted pattern, expected '}}}}'")]
    UnterminatedPattern,

    #[error("invalid escape sequence{}", escape_suffix(.found))]
    InvalidEscape { found: Option<char> },

    #[error("duplicate option name '{name}'")]
    DuplicateOption { name: String },

    #[error("duplicate declaration of '${name}'")]
    DuplicateDeclaration { name: String },

    #[error(".input declaration requires a variable operand")]
    InputWithoutVariable,

    #[error("variant has {found} keys but the matcher has {expected} selectors")]
    VariantKeyMismatch { expected: usize, found: usize },

    #[error("matcher has no variant whose keys are all '*'")]
    MissingFallbackVariant,

    #[error("closing markup cannot have options")]
    OptionsOnClose,

    #[error("nesting exceeds the limit of {limit}")]
    NestingTooDeep { limit: usize },

    #[error("message exceeds the limit of {limit} code points")]
    InputTooLong { limit: usize },

    #[error("invalid character {found:?} in pattern")]
    InvalidPatternCharacter { found: char },

    #[error("unsupported statement '.{keyword}'{}", suggestion_suffix(.suggestion.as_deref()))]
    UnsupportedStatement {
        keyword: String,
        suggestion: Option<String>,
    },

    #[error("unsupported annotation '{sigil}'")]
    UnsupportedAnnotation { sigil: char },
}

fn escape_suffix(found: &Option<char>) -> String {
    match found {
        Some(c) => format!(" '\\{c}'"),
        None => String::from(" at end of input"),
    }
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion
        .map(|s| format!(", did you mean '.{s}'?"))
        .unwrap_or_default()
}

impl ErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorKind::InvalidPatternCharacter { .. } => ErrorCategory::Pattern,
            ErrorKind::UnsupportedStatement { .. } | ErrorKind::UnsupportedAnnotation { .. } => {
                ErrorCategory::Unsupported
            }
            _ => ErrorCategory::Syntax,
        }
    }

    pub fn severity(&self) -> Severity {
        match self.category() {
            ErrorCategory::Syntax => Severity::Fatal,
            ErrorCategory::Pattern | ErrorCategory::Unsupported => Severity::Recoverable,
        }
    }

    /// Builds an unsupported-statement error, suggesting a known keyword
    /// when `keyword` looks like a typo of one.
    pub fn unsupported_statement(keyword: &str) -> Self {
        ErrorKind::UnsupportedStatement {
            keyword: keyword.to_string(),
            suggestion: suggest_keyword(keyword).map(str::to_string),
        }
    }
}

const KEYWORDS: [&str; 3] = ["local", "input", "match"];

fn suggest_keyword(keyword: &str) -> Option<&'static str> {
    let max_distance = if keyword.chars().count() <= 3 { 1 } else { 2 };
    KEYWORDS
        .iter()
        .map(|candidate| (levenshtein(keyword, candidate), *candidate))
        .filter(|(dist, _)| *dist > 0 && *dist <= max_distance)
        .min_by_key(|(dist, _)| *dist)
        .map(|(_, candidate)| candidate)
}

/// A parse error with its location in the message.
///
/// Offsets and columns count code points, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    pub kind: ErrorKind,
    /// Code-point offset from the start of the message.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, in code points from the start of the line.
    pub column: usize,
    /// Code points before the start of the line, newlines included.
    pub line_start: usize,
    /// Up to `context_len` code points of the line before the error.
    pub pre_context: String,
    /// Up to `context_len` code points of the line from the error onwards.
    pub post_context: String,
}

impl ParseError {
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Converts the code-point offset to a UTF-8 byte offset into `source`.
    pub fn byte_offset(&self, source: &str) -> usize {
        source
            .char_indices()
            .nth(self.offset)
            .map_or(source.len(), |(i, _)| i)
    }
}

/// Raw location of an error: offset plus the line state when it was seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mark {
    pub offset: usize,
    /// 0-based line.
    pub line: usize,
    pub line_start: usize,
}

impl Mark {
    /// Locates `offset` by scanning `source`, for errors raised before any
    /// input has been consumed.
    pub fn locate(source: &[char], offset: usize) -> Self {
        let prefix = &source[..offset.min(source.len())];
        let line = prefix.iter().filter(|&&c| c == '\n').count();
        let line_start = prefix
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |pos| pos + 1);
        Self {
            offset,
            line,
            line_start,
        }
    }
}

/// An untranslated error.
#[derive(Debug)]
pub(crate) struct Failure {
    pub kind: ErrorKind,
    pub at: Mark,
}

pub(crate) type PResult<T> = Result<T, Failure>;

/// Tracks line state while a message is consumed and collects
/// recoverable errors. Translation to [`ParseError`] happens once, when the
/// parse ends.
#[derive(Debug, Default)]
pub(crate) struct ErrorReporter {
    line: usize,
    line_start: usize,
    recorded: Vec<Failure>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called for every consumed code point; `index` is its position.
    pub fn maybe_advance_line(&mut self, consumed: char, index: usize) {
        if consumed == '\n' {
            self.line += 1;
            self.line_start = index + 1;
        }
    }

    /// Captures the current line state for an error at `offset`.
    pub fn mark(&self, offset: usize) -> Mark {
        Mark {
            offset,
            line: self.line,
            line_start: self.line_start,
        }
    }

    /// Records a recoverable error.
    pub fn record(&mut self, kind: ErrorKind, at: Mark) {
        tracing::debug!(offset = at.offset, error = %kind, "recoverable parse error");
        self.recorded.push(Failure { kind, at });
    }

    /// Translates the recorded errors.
    pub fn finish(self, source: &[char], context_len: usize) -> Vec<ParseError> {
        self.recorded
            .into_iter()
            .map(|failure| translate_parse_error(source, failure, context_len))
            .collect()
    }
}

/// Converts an internal failure into a user-facing [`ParseError`] with
/// context snippets bounded to `context_len` code points on its line.
pub(crate) fn translate_parse_error(
    source: &[char],
    failure: Failure,
    context_len: usize,
) -> ParseError {
    let Failure { kind, at } = failure;
    let offset = at.offset.min(source.len());
    let pre_start = at.line_start.max(offset.saturating_sub(context_len));
    let pre_context: String = source[pre_start..offset].iter().collect();
    let post_context: String = source[offset..]
        .iter()
        .take(context_len)
        .take_while(|&&c| c != '\n')
        .collect();

    ParseError {
        kind,
        offset,
        line: at.line + 1,
        column: offset - at.line_start + 1,
        line_start: at.line_start,
        pre_context,
        post_context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_line_tracking_advances_on_newline() {
        let source = chars("ab\ncd\nef");
        let mut reporter = ErrorReporter::new();
        for (index, &c) in source.iter().enumerate().take(7) {
            reporter.maybe_advance_line(c, index);
        }
        let mark = reporter.mark(7);
        assert_eq!(mark.line, 2);
        assert_eq!(mark.line_start, 6);
        assert_eq!(mark, Mark::locate(&source, 7));
    }

    #[test]
    fn test_translate_reports_one_based_position() {
        let source = chars("first\nsecond line");
        let at = Mark::locate(&source, 9);
        let error = translate_parse_error(
            &source,
            Failure {
                kind: ErrorKind::MissingWhitespace,
                at,
            },
            15,
        );
        assert_eq!(error.line, 2);
        assert_eq!(error.column, 4);
        assert_eq!(error.line_start, 6);
        assert_eq!(error.pre_context, "sec");
        assert_eq!(error.post_context, "ond line");
        assert_eq!(error.to_string(), "missing required whitespace at 2:4");
    }

    #[test]
    fn test_context_is_bounded() {
        let source = chars("0123456789abcdefghij");
        let error = translate_parse_error(
            &source,
            Failure {
                kind: ErrorKind::UnterminatedLiteral,
                at: Mark::locate(&source, 10),
            },
            4,
        );
        assert_eq!(error.pre_context, "6789");
        assert_eq!(error.post_context, "abcd");
    }

    #[test]
    fn test_context_at_end_of_input() {
        let source = chars("{|abc}");
        let error = translate_parse_error(
            &source,
            Failure {
                kind: ErrorKind::UnterminatedLiteral,
                at: Mark::locate(&source, 6),
            },
            15,
        );
        assert_eq!(error.column, 7);
        assert_eq!(error.pre_context, "{|abc}");
        assert_eq!(error.post_context, "");
    }

    #[test]
    fn test_byte_offset_counts_utf8() {
        let source = "é{";
        let error = translate_parse_error(
            &chars(source),
            Failure {
                kind: ErrorKind::MissingWhitespace,
                at: Mark::locate(&chars(source), 1),
            },
            15,
        );
        assert_eq!(error.offset, 1);
        assert_eq!(error.byte_offset(source), 2);
    }

    #[test]
    fn test_keyword_suggestions() {
        assert_eq!(suggest_keyword("locl"), Some("local"));
        assert_eq!(suggest_keyword("inptu"), Some("input"));
        assert_eq!(suggest_keyword("when"), None);
        assert_eq!(suggest_keyword("local"), None);
    }

    #[test]
    fn test_severity_follows_category() {
        assert_eq!(
            ErrorKind::InvalidPatternCharacter { found: '}' }.severity(),
            Severity::Recoverable
        );
        assert_eq!(
            ErrorKind::UnsupportedAnnotation { sigil: '!' }.category(),
            ErrorCategory::Unsupported
        );
        assert_eq!(ErrorKind::MissingFallbackVariant.severity(), Severity::Fatal);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ErrorKind::InvalidEscape { found: Some('n') }.to_string(),
            "invalid escape sequence '\\n'"
        );
        assert_eq!(
            ErrorKind::unsupported_statement("locl").to_string(),
            "unsupported statement '.locl', did you mean '.local'?"
        );
        assert_eq!(
            ErrorKind::UnexpectedCharacter {
                found: '}',
                expected: Expected::Token("=")
            }
            .to_string(),
            "unexpected character '}', expected '='"
        );
    }
}
