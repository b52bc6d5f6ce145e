//! Implementation of the `mf2 normalize` command.

use miette::Report;
use mf2::parse;

use crate::output::{print_warnings, Mf2Diagnostic};

/// Arguments for the normalize command.
#[derive(Debug, clap::Args)]
pub struct NormalizeArgs {
    /// Message to normalize
    pub message: String,
}

/// Run the normalize command.
pub fn run_normalize(args: NormalizeArgs) -> miette::Result<i32> {
    match parse(&args.message) {
        Ok(parsed) => {
            print_warnings("<message>", 1, &parsed.errors);
            println!("{}", parsed.normalized);
            Ok(exitcode::OK)
        }
        Err(error) => {
            let diagnostic = Mf2Diagnostic::from_parse_error("<message>", &args.message, 0, &error);
            eprintln!("{:?}", Report::new(diagnostic));
            Ok(exitcode::DATAERR)
        }
    }
}
