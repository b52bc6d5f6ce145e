//! MessageFormat 2 syntax parser.
//!
//! A hand-written recursive-descent parser over the code points of a
//! message. It drives a [`MessageBuilder`], produces a normalized copy of
//! the input and reports errors with code-point positions.

mod cursor;
mod declarations;
pub mod error;
mod expression;
mod grammar;
mod lexer;
mod literal;
mod options;
mod pattern;

pub use cursor::Cursor;
pub use error::{ErrorCategory, ErrorKind, Expected, ParseError, Severity};
pub use options::ParseOptions;

use crate::builder::{DataModelBuilder, MessageBuilder};
use crate::model::MFDataModel;
use error::{Mark, translate_parse_error};
use grammar::Parser;

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    pub model: MFDataModel,
    /// The input with insignificant whitespace canonicalized. Parsing it
    /// again yields an equal model.
    pub normalized: String,
    /// Recoverable errors: invalid pattern characters and unsupported
    /// constructs.
    pub errors: Vec<ParseError>,
}

impl Parsed {
    /// True if the parse produced no recoverable errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parses a message with default options.
///
/// # Example
///
/// ```
/// use mf2::parse;
///
/// let parsed = parse("Hello, {$name}!").unwrap();
/// assert_eq!(parsed.normalized, "{{Hello, {$name}!}}");
/// assert!(parsed.is_clean());
/// ```
pub fn parse(source: &str) -> Result<Parsed, ParseError> {
    parse_with_options(source, &ParseOptions::default())
}

/// Parses a message into an [`MFDataModel`].
pub fn parse_with_options(source: &str, options: &ParseOptions) -> Result<Parsed, ParseError> {
    let mut builder = DataModelBuilder::new();
    let mut normalized = String::with_capacity(source.len());
    let errors = parse_into(source, options, &mut builder, &mut normalized)?;
    Ok(Parsed {
        model: builder.build(),
        normalized,
        errors,
    })
}

/// Parses a message into a caller-owned builder and normalized buffer.
///
/// Returns the recoverable errors on success. On a fatal error the builder
/// keeps what it received before the failure and `normalized` holds the
/// output produced up to that point.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn parse_into<B: MessageBuilder + ?Sized>(
    source: &str,
    options: &ParseOptions,
    builder: &mut B,
    normalized: &mut String,
) -> Result<Vec<ParseError>, ParseError> {
    let chars: Vec<char> = source.chars().collect();

    if let Some(limit) = options.max_length {
        if chars.len() > limit {
            let failure = error::Failure {
                kind: ErrorKind::InputTooLong { limit },
                at: Mark::locate(&chars, limit),
            };
            tracing::debug!(limit, "message too long");
            return Err(translate_parse_error(&chars, failure, options.context_len));
        }
    }

    let mut parser = Parser::new(&chars, options, builder, normalized);
    match parser.parse_message() {
        Ok(()) => {
            let errors = parser.finish();
            tracing::debug!(recoverable = errors.len(), "parse complete");
            Ok(errors)
        }
        Err(failure) => Err(translate_parse_error(&chars, failure, options.context_len)),
    }
}
