//! Diagnostics and the Result Aggregator.

use std::fmt;

use serde::Serialize;

use super::columns::ColumnMatch;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks overall validity
    Error,
    /// Informational only
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Identifier of the check that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    MissingColumn,
    Required,
    Unique,
    MinLength,
    MaxLength,
    DataType,
    InvalidCharacters,
    Pattern,
    AllowedValues,
    BusinessRule,
    Range,
    Format,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingColumn => "missing_column",
            Self::Required => "required",
            Self::Unique => "unique",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::DataType => "data_type",
            Self::InvalidCharacters => "invalid_characters",
            Self::Pattern => "pattern",
            Self::AllowedValues => "allowed_values",
            Self::BusinessRule => "business_rule",
            Self::Range => "range",
            Self::Format => "format",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Row number, 0 for file-level findings
    pub row: usize,
    pub column: String,
    pub value: String,
    pub check: CheckKind,
    pub message: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Diagnostic {
    pub fn is_file_level(&self) -> bool {
        self.row == 0
    }
}

/// Ordered collector for diagnostics emitted during one validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(
        &mut self,
        row: usize,
        column: &str,
        value: &str,
        check: CheckKind,
        message: String,
    ) -> &mut Diagnostic {
        self.push(row, column, value, check, message, Severity::Error)
    }

    pub fn add_warning(
        &mut self,
        row: usize,
        column: &str,
        value: &str,
        check: CheckKind,
        message: String,
    ) -> &mut Diagnostic {
        self.push(row, column, value, check, message, Severity::Warning)
    }

    fn push(
        &mut self,
        row: usize,
        column: &str,
        value: &str,
        check: CheckKind,
        message: String,
        severity: Severity,
    ) -> &mut Diagnostic {
        self.items.push(Diagnostic {
            row,
            column: column.to_string(),
            value: value.to_string(),
            check,
            message,
            severity,
            notes: None,
        });
        let last = self.items.len() - 1;
        &mut self.items[last]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

/// Outcome of validating one file against one template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub total_rows: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: String,
    pub column_matches: bool,
    pub missing_columns: Vec<String>,
    pub extra_columns: Vec<String>,
}

impl ValidationResult {
    /// Classify diagnostics by severity and build the summary.
    ///
    /// Validity depends on the error count only; warnings never affect it.
    pub fn aggregate(total_rows: usize, diagnostics: Diagnostics, columns: ColumnMatch) -> Self {
        let diagnostics = diagnostics.into_vec();
        let error_count = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count();
        let warning_count = diagnostics.len() - error_count;

        let summary = summarize(
            total_rows,
            error_count,
            warning_count,
            &columns.missing_columns,
        );

        Self {
            is_valid: error_count == 0,
            total_rows,
            error_count,
            warning_count,
            diagnostics,
            summary,
            column_matches: columns.matches(),
            missing_columns: columns.missing_columns,
            extra_columns: columns.extra_columns,
        }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

fn summarize(rows: usize, errors: usize, warnings: usize, missing: &[String]) -> String {
    let mut summary = if errors > 0 {
        format!(
            "Validation failed with {} and {} across {}.",
            count_noun(errors, "error"),
            count_noun(warnings, "warning"),
            count_noun(rows, "row")
        )
    } else if warnings > 0 {
        format!(
            "Validation passed with {} across {}.",
            count_noun(warnings, "warning"),
            count_noun(rows, "row")
        )
    } else {
        format!("All {} passed validation.", count_noun(rows, "row"))
    };

    if !missing.is_empty() {
        summary.push_str(&format!(" Missing columns: {}.", missing.join(", ")));
    }

    summary
}

fn count_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
