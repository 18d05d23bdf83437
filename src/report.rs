//! Plain-text rendering of validation results for the command line.

use std::fmt::Write;

use crate::validation::{Diagnostic, ValidationResult};

/// Render a result as a human-readable report
pub fn render_text(template: &str, result: &ValidationResult) -> String {
    let mut out = String::new();

    let status = if result.is_valid { "VALID" } else { "INVALID" };
    let _ = writeln!(out, "Template: {}", template);
    let _ = writeln!(out, "Status:   {}", status);
    let _ = writeln!(out, "Summary:  {}", result.summary);

    if !result.column_matches {
        if !result.missing_columns.is_empty() {
            let _ = writeln!(out, "Missing columns: {}", result.missing_columns.join(", "));
        }
        if !result.extra_columns.is_empty() {
            let _ = writeln!(out, "Extra columns:   {}", result.extra_columns.join(", "));
        }
    }

    if !result.diagnostics.is_empty() {
        out.push('\n');
        for diagnostic in &result.diagnostics {
            let _ = writeln!(out, "{}", format_diagnostic(diagnostic));
        }
    }

    out
}

/// Format one diagnostic as a single line
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    let location = if diagnostic.is_file_level() {
        "file".to_string()
    } else {
        format!("row {}", diagnostic.row)
    };

    let mut line = format!(
        "{:<7} {:<9} {:<20} [{}] {}",
        diagnostic.severity, location, diagnostic.column, diagnostic.check, diagnostic.message
    );
    if let Some(notes) = &diagnostic.notes {
        line.push_str(&format!(" (note: {})", notes));
    }
    line
}
