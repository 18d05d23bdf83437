//! Column Matcher
//!
//! Compares the template's expected columns with the file headers.

use std::collections::HashSet;

use super::result::{CheckKind, Diagnostics};
use crate::template::CompiledTemplate;

/// Missing and extra columns for one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMatch {
    /// Template columns absent from the file, in template order
    pub missing_columns: Vec<String>,
    /// File columns the template does not declare, in file order
    pub extra_columns: Vec<String>,
}

impl ColumnMatch {
    /// True only when nothing is missing and nothing is extra
    pub fn matches(&self) -> bool {
        self.missing_columns.is_empty() && self.extra_columns.is_empty()
    }

    pub fn is_missing(&self, column: &str) -> bool {
        self.missing_columns.iter().any(|c| c == column)
    }
}

/// Match template columns against normalized headers.
///
/// Emits one file-level `missing_column` error per missing required
/// column; missing optional columns are only listed.
pub fn match_columns(
    template: &CompiledTemplate,
    headers: &[String],
    diagnostics: &mut Diagnostics,
) -> ColumnMatch {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let expected: HashSet<&str> = template
        .rules
        .iter()
        .map(|compiled| compiled.rule.column.as_str())
        .collect();

    let mut missing_columns = Vec::new();
    for compiled in &template.rules {
        let rule = &compiled.rule;
        if present.contains(rule.column.as_str()) {
            continue;
        }

        missing_columns.push(rule.column.clone());
        if rule.required {
            diagnostics
                .add_error(
                    0,
                    &rule.column,
                    "",
                    CheckKind::MissingColumn,
                    format!("Required column '{}' is missing from the file", rule.column),
                )
                .notes = rule.notes.clone();
        }
    }

    let mut seen = HashSet::new();
    let extra_columns = headers
        .iter()
        .filter(|header| !header.is_empty() && !expected.contains(header.as_str()))
        .filter(|header| seen.insert(header.as_str()))
        .cloned()
        .collect();

    ColumnMatch {
        missing_columns,
        extra_columns,
    }
}
