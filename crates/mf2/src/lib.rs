//! Parser for MessageFormat 2 messages.
//!
//! [`parse`] turns a message string into an [`MFDataModel`] together with a
//! normalized copy of the input. Formatting and function lookup are left to
//! the consumer of the data model.

mod builder;
pub mod chars;
pub mod model;
pub mod parser;

pub use builder::{DataModelBuilder, MessageBuilder};
pub use model::{Body, Declaration, Expression, MFDataModel, Pattern, PatternPart};
pub use parser::{
    ErrorCategory, ErrorKind, ParseError, ParseOptions, Parsed, Severity, parse, parse_into,
    parse_with_options,
};
