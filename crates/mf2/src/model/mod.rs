//! The MessageFormat 2 data model produced by the parser.
//!
//! These types are public so that formatters, linters and other tooling can
//! consume parsed messages. Every type serializes with serde.

mod expression;
mod message;
mod names;
mod pattern;

pub use expression::{
    Annotation, Attribute, Attributes, DuplicateName, Expression, Markup, MarkupKind, NamedSink,
    Operator, OptionMap, ReservedAnnotation,
};
pub use message::{Body, Declaration, Key, MFDataModel, Matcher, SelectorKeys, Variant};
pub use names::{FunctionName, Identifier, Literal, Operand, VariableName};
pub use pattern::{Pattern, PatternPart, Placeholder};
