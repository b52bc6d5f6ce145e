//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Check results for a single file.
pub struct FileSummary {
    pub name: String,
    pub messages: usize,
    pub errors: usize,
    pub warnings: usize,
}

/// Format per-file check results as a table.
pub fn format_summary_table(files: &[FileSummary]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["File", "Messages", "Errors", "Warnings"]);

    for file in files {
        table.add_row(vec![
            file.name.clone(),
            file.messages.to_string(),
            file.errors.to_string(),
            file.warnings.to_string(),
        ]);
    }

    table
}
