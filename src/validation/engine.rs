//! Validation Engine
//!
//! Single synchronous pass: parse, match columns, evaluate every row,
//! aggregate. Each call owns its own uniqueness state.

use std::io;

use super::columns::{match_columns, ColumnMatch};
use super::domain::check_domain;
use super::result::{Diagnostics, ValidationResult};
use super::rules::evaluate_cell;
use super::uniqueness::UniquenessTracker;
use crate::parser::{self, ParsedTable, Row, RowReader};
use crate::template::CompiledTemplate;

/// Row-at-a-time validation state for one file.
///
/// Created from the file headers, fed rows in order, and consumed by
/// [`ValidationSession::finish`]. Not shared between files.
pub struct ValidationSession<'t> {
    template: &'t CompiledTemplate,
    columns: ColumnMatch,
    /// Indices of rules whose column is present in the file
    active_rules: Vec<usize>,
    tracker: UniquenessTracker,
    diagnostics: Diagnostics,
    total_rows: usize,
}

impl<'t> ValidationSession<'t> {
    pub fn new(template: &'t CompiledTemplate, headers: &[String]) -> Self {
        let mut diagnostics = Diagnostics::new();
        let columns = match_columns(template, headers, &mut diagnostics);

        let active_rules = template
            .rules
            .iter()
            .enumerate()
            .filter(|(_, compiled)| !columns.is_missing(&compiled.rule.column))
            .map(|(idx, _)| idx)
            .collect();

        Self {
            template,
            columns,
            active_rules,
            tracker: UniquenessTracker::new(),
            diagnostics,
            total_rows: 0,
        }
    }

    /// Evaluate every present rule against one row
    pub fn push_row(&mut self, row: &Row) {
        self.total_rows += 1;

        for &idx in &self.active_rules {
            let compiled = &self.template.rules[idx];
            let column = compiled.rule.column.as_str();

            evaluate_cell(
                compiled,
                row.number,
                row.value(column),
                &mut self.tracker,
                &mut self.diagnostics,
            );
            check_domain(column, row, &mut self.diagnostics);
        }
    }

    /// Aggregate everything seen so far into a result
    pub fn finish(self) -> ValidationResult {
        let result = ValidationResult::aggregate(self.total_rows, self.diagnostics, self.columns);

        log::debug!(
            "Template '{}': {} rows, {} errors, {} warnings",
            self.template.name,
            result.total_rows,
            result.error_count,
            result.warning_count
        );

        result
    }
}

/// Validate raw tabular text against a template
pub fn validate_text(text: &str, template: &CompiledTemplate) -> ValidationResult {
    validate_table(&parser::parse_table(text), template)
}

/// Validate an already parsed table
pub fn validate_table(table: &ParsedTable, template: &CompiledTemplate) -> ValidationResult {
    let mut session = ValidationSession::new(template, &table.headers);
    for row in &table.rows {
        session.push_row(row);
    }
    session.finish()
}

/// Validate a table streamed from a reader, one row in memory at a time
pub fn validate_reader<R: io::Read>(reader: R, template: &CompiledTemplate) -> ValidationResult {
    let mut rows = RowReader::new(reader);
    let mut session = ValidationSession::new(template, rows.headers());
    for row in rows.by_ref() {
        session.push_row(&row);
    }
    session.finish()
}
