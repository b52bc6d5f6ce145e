//! Implementation of the `mf2 ast` command.

use miette::{IntoDiagnostic, Report};
use mf2::{parse, Body};

use crate::output::{print_warnings, Mf2Diagnostic};

/// Arguments for the ast command.
#[derive(Debug, clap::Args)]
pub struct AstArgs {
    /// Message to parse
    pub message: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the ast command.
pub fn run_ast(args: AstArgs) -> miette::Result<i32> {
    let parsed = match parse(&args.message) {
        Ok(parsed) => parsed,
        Err(error) => {
            if args.json {
                let output = serde_json::json!({ "error": error });
                eprintln!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
            } else {
                let diagnostic =
                    Mf2Diagnostic::from_parse_error("<message>", &args.message, 0, &error);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            return Ok(exitcode::DATAERR);
        }
    };

    let recovered = match &parsed.model.body {
        Body::Pattern(pattern) => pattern.has_errors(),
        Body::Matcher(matcher) => matcher.variants.iter().any(|v| v.pattern.has_errors()),
    };
    tracing::debug!(body = parsed.model.body.shape(), recovered, "parsed message");

    if args.json {
        let output = serde_json::json!({
            "model": parsed.model,
            "warnings": parsed.errors,
        });
        println!("{}", serde_json::to_string_pretty(&output).into_diagnostic()?);
    } else {
        print_warnings("<message>", 1, &parsed.errors);
        println!("{:#?}", parsed.model);
    }
    Ok(exitcode::OK)
}
