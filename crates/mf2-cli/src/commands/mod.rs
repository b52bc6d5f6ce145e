//! CLI command implementations.

mod ast;
mod check;
mod normalize;

pub use ast::{run_ast, AstArgs};
pub use check::{run_check, CheckArgs};
pub use normalize::{run_normalize, NormalizeArgs};
