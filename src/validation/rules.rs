//! Rule Evaluator
//!
//! Structural checks for one cell against one rule, run in a fixed order.

use super::result::{CheckKind, Diagnostics};
use super::uniqueness::UniquenessTracker;
use crate::template::{CompiledRule, DataType};

const BOOLEAN_VALUES: [&str; 6] = ["yes", "no", "true", "false", "1", "0"];

/// Run the required, blank, unique, length, boolean, invalid-character
/// and pattern checks for one cell.
///
/// An empty value stops evaluation after the blank checks.
pub fn evaluate_cell(
    compiled: &CompiledRule,
    row: usize,
    value: &str,
    tracker: &mut UniquenessTracker,
    diagnostics: &mut Diagnostics,
) {
    let rule = &compiled.rule;
    let column = rule.column.as_str();
    let mut emit = |check: CheckKind, message: String| {
        diagnostics.add_error(row, column, value, check, message).notes = rule.notes.clone();
    };

    if value.is_empty() {
        if rule.required && !rule.allow_blank {
            emit(
                CheckKind::Required,
                format!("'{}' is required and cannot be blank", column),
            );
        }
        return;
    }

    if rule.unique && !tracker.record(column, value) {
        emit(
            CheckKind::Unique,
            format!("Duplicate value '{}' in '{}' (values must be unique)", value, column),
        );
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            emit(
                CheckKind::MinLength,
                format!(
                    "'{}' must be at least {} characters long (got {})",
                    column, min, length
                ),
            );
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            emit(
                CheckKind::MaxLength,
                format!(
                    "'{}' must be at most {} characters long (got {})",
                    column, max, length
                ),
            );
        }
    }

    if rule.data_type == DataType::Boolean && !is_boolean(value) {
        emit(
            CheckKind::DataType,
            format!(
                "'{}' expects a boolean value ({}), got '{}'",
                column,
                BOOLEAN_VALUES.join("/"),
                value
            ),
        );
    }

    if let Some(invalid) = rule.invalid_characters.as_deref() {
        let offending = offending_characters(value, invalid);
        if !offending.is_empty() {
            let listed: Vec<String> = offending.iter().map(|c| format!("'{}'", c)).collect();
            emit(
                CheckKind::InvalidCharacters,
                format!("'{}' contains invalid characters: {}", column, listed.join(", ")),
            );
        }
    }

    if !compiled.matches_pattern(value) {
        let pattern = rule.pattern.as_deref().unwrap_or_default();
        emit(
            CheckKind::Pattern,
            format!(
                "'{}' value '{}' does not match the required pattern '{}'",
                column, value, pattern
            ),
        );
    }
}

fn is_boolean(value: &str) -> bool {
    BOOLEAN_VALUES
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(value))
}

/// Characters of `value` found in `invalid`, each once, in order of appearance
fn offending_characters(value: &str, invalid: &str) -> Vec<char> {
    let mut found = Vec::new();
    for c in value.chars() {
        if invalid.contains(c) && !found.contains(&c) {
            found.push(c);
        }
    }
    found
}
