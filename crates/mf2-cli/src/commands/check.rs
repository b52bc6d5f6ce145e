//! Implementation of the `mf2 check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic, Report};
use mf2::{parse_with_options, ParseError, ParseOptions};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::table::{format_summary_table, FileSummary};
use crate::output::{print_warnings, Mf2Diagnostic};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check. Each non-blank line is one message.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat each file as a single message
    #[arg(long)]
    pub whole: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail on warnings as well as errors
    #[arg(long)]
    pub strict: bool,

    /// Maximum placeholder nesting depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum message length in code points
    #[arg(long)]
    pub max_length: Option<usize>,
}

/// A message located in a file.
struct Message<'a> {
    /// 1-based line on which the message starts.
    line: usize,
    /// Byte offset of the message in the file.
    start: usize,
    text: &'a str,
}

/// JSON output for one diagnostic.
#[derive(Debug, Serialize)]
struct DiagnosticJson {
    /// Line in the file, as opposed to `error.line` within the message.
    file_line: usize,
    error: ParseError,
}

/// JSON output for one file.
#[derive(Debug, Serialize)]
struct FileJson {
    file: String,
    messages: usize,
    errors: Vec<DiagnosticJson>,
    warnings: Vec<DiagnosticJson>,
}

fn split_messages(content: &str, whole: bool) -> Vec<Message<'_>> {
    if whole {
        return vec![Message {
            line: 1,
            start: 0,
            text: content,
        }];
    }
    let mut messages = Vec::new();
    let mut start = 0;
    for (index, raw) in content.split('\n').enumerate() {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        if !text.trim().is_empty() {
            messages.push(Message {
                line: index + 1,
                start,
                text,
            });
        }
        start += raw.len() + 1;
    }
    messages
}

fn to_json(message: &Message<'_>, error: ParseError) -> DiagnosticJson {
    DiagnosticJson {
        file_line: message.line + error.line - 1,
        error,
    }
}

/// Limits given on the command line, with library defaults for the rest.
fn parse_options(args: &CheckArgs) -> ParseOptions {
    ParseOptions::builder()
        .maybe_max_depth(args.max_depth)
        .maybe_max_length(args.max_length)
        .build()
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let options = parse_options(&args);

    let mut summaries = Vec::new();
    let mut reports = Vec::new();
    let mut unreadable = false;

    for path in &args.files {
        let name = path.display().to_string();
        let content = match read_to_string(path).into_diagnostic() {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{:?}", miette!("Cannot read {}: {}", name, e));
                unreadable = true;
                continue;
            }
        };

        let messages = split_messages(&content, args.whole);
        tracing::debug!(file = %name, messages = messages.len(), "checking file");

        let mut report = FileJson {
            file: name.clone(),
            messages: messages.len(),
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        for message in &messages {
            match parse_with_options(message.text, &options) {
                Ok(parsed) => {
                    if !args.json {
                        print_warnings(&name, message.line, &parsed.errors);
                    }
                    report
                        .warnings
                        .extend(parsed.errors.into_iter().map(|e| to_json(message, e)));
                }
                Err(error) => {
                    if !args.json {
                        let diagnostic =
                            Mf2Diagnostic::from_parse_error(&name, &content, message.start, &error);
                        eprintln!("{:?}", Report::new(diagnostic));
                    }
                    report.errors.push(to_json(message, error));
                }
            }
        }

        summaries.push(FileSummary {
            name,
            messages: report.messages,
            errors: report.errors.len(),
            warnings: report.warnings.len(),
        });
        reports.push(report);
    }

    let errors: usize = summaries.iter().map(|s| s.errors).sum();
    let warnings: usize = summaries.iter().map(|s| s.warnings).sum();

    if args.json {
        let json_output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{}", json_output);
    } else if !summaries.is_empty() {
        println!("{}", format_summary_table(&summaries));
        if errors == 0 && warnings == 0 {
            println!("{}", "All messages are valid.".green());
        }
    }

    if unreadable {
        Ok(exitcode::NOINPUT)
    } else if errors > 0 || (args.strict && warnings > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
