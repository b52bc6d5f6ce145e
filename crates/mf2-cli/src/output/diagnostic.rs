//! Miette diagnostics and warning lines for MF2 parse errors.

use miette::{Diagnostic, NamedSource, SourceSpan};
use mf2::{ErrorKind, ParseError};
use owo_colors::OwoColorize;
use thiserror::Error;

/// A miette-compatible diagnostic for a fatal parse error.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(mf2::syntax))]
pub struct Mf2Diagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl Mf2Diagnostic {
    /// Creates a diagnostic for an error in a message that starts at byte
    /// `message_start` of `content`.
    pub fn from_parse_error(
        name: &str,
        content: &str,
        message_start: usize,
        err: &ParseError,
    ) -> Self {
        let message = &content[message_start..];
        let offset = (message_start + err.byte_offset(message)).min(content.len());
        let width = content[offset..].chars().next().map_or(0, char::len_utf8);

        Mf2Diagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, width).into(),
            message: err.kind.to_string(),
            help: help_for(&err.kind),
        }
    }
}

fn help_for(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::MissingFallbackVariant => {
            Some("add a variant whose keys are all '*'".to_string())
        }
        ErrorKind::VariantKeyMismatch { expected, .. } => {
            Some(format!("each variant needs exactly {expected} keys"))
        }
        ErrorKind::MissingWhitespace => Some("insert a space here".to_string()),
        ErrorKind::InvalidEscape { .. } => {
            Some("only \\\\, \\{, \\| and \\} are valid escapes".to_string())
        }
        ErrorKind::NestingTooDeep { .. } => Some("raise the limit with --max-depth".to_string()),
        _ => None,
    }
}

/// Prints recoverable errors as one-line warnings. `first_line` is the file
/// line on which the message starts.
pub fn print_warnings(name: &str, first_line: usize, warnings: &[ParseError]) {
    for warning in warnings {
        eprintln!(
            "{}: {}:{}:{}: {}",
            "warning".yellow().bold(),
            name,
            first_line + warning.line - 1,
            warning.column,
            warning.kind
        );
    }
}
