//! Rendering of parse results for the terminal.

pub mod diagnostic;
pub mod table;

pub use diagnostic::{print_warnings, Mf2Diagnostic};
