//! Column-keyed domain checks
//!
//! Business checks selected by column name rather than by rule flags.
//! They run on every non-empty cell of a recognised column, regardless
//! of what the structural checks found.

use std::sync::LazyLock;

use regex::Regex;

use super::result::{CheckKind, Diagnostics};
use crate::parser::Row;

const UNIT_COLUMNS: &[&str] = &["UOM", "UNIT_OF_MEASURE", "UNITS"];
const COLLECTION_METHOD_COLUMNS: &[&str] = &["COLLECTION_METHOD", "READ_METHOD"];
const LATITUDE_COLUMNS: &[&str] = &["LATITUDE", "LAT"];
const LONGITUDE_COLUMNS: &[&str] = &["LONGITUDE", "LONG", "LON", "LNG"];
const EMAIL_COLUMNS: &[&str] = &["EMAIL", "EMAIL_ADDRESS", "CONTACT_EMAIL"];
const PHONE_COLUMNS: &[&str] = &["PHONE", "PHONE_NUMBER", "CONTACT_PHONE"];

/// Allowed units of measure by commodity
pub const UNIT_GROUPS: [(&str, &[&str]); 3] = [
    ("gas", &["CCF", "MCF", "THERM", "THERMS", "DTH", "CF"]),
    ("water", &["GAL", "GALLONS", "KGAL", "HCF", "CCF", "CF"]),
    ("electric", &["KWH", "MWH", "KW", "KVARH"]),
];

/// Allowed collection methods
pub const COLLECTION_METHODS: &[&str] = &["MANUAL", "AMR", "AMI", "CELLULAR", "RADIO", "ESTIMATED"];

const CELLULAR_METHOD: &str = "CELLULAR";
/// Column that must carry the cellular marker for cellular meters
pub const TAG_COLUMN: &str = "TAGS";
const CELLULAR_TAG: &str = "CELLULAR";

const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Columns with built-in domain checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainColumn {
    UnitOfMeasure,
    CollectionMethod,
    Latitude,
    Longitude,
    Email,
    Phone,
}

impl DomainColumn {
    /// Recognise a normalized column name
    pub fn classify(column: &str) -> Option<Self> {
        let table: [(&[&str], Self); 6] = [
            (UNIT_COLUMNS, Self::UnitOfMeasure),
            (COLLECTION_METHOD_COLUMNS, Self::CollectionMethod),
            (LATITUDE_COLUMNS, Self::Latitude),
            (LONGITUDE_COLUMNS, Self::Longitude),
            (EMAIL_COLUMNS, Self::Email),
            (PHONE_COLUMNS, Self::Phone),
        ];

        table
            .iter()
            .find(|(names, _)| names.contains(&column))
            .map(|(_, kind)| *kind)
    }
}

/// Run the domain checks for one cell, if its column has any
pub fn check_domain(column: &str, row: &Row, diagnostics: &mut Diagnostics) {
    let value = row.value(column);
    if value.is_empty() {
        return;
    }

    let Some(kind) = DomainColumn::classify(column) else {
        return;
    };

    match kind {
        DomainColumn::UnitOfMeasure => check_unit(column, row.number, value, diagnostics),
        DomainColumn::CollectionMethod => check_collection_method(column, row, value, diagnostics),
        DomainColumn::Latitude => check_coordinate(column, row.number, value, 90.0, diagnostics),
        DomainColumn::Longitude => check_coordinate(column, row.number, value, 180.0, diagnostics),
        DomainColumn::Email => {
            if !EMAIL_RE.is_match(value) {
                diagnostics.add_warning(
                    row.number,
                    column,
                    value,
                    CheckKind::Format,
                    format!("'{}' is not a valid email address", value),
                );
            }
        }
        DomainColumn::Phone => {
            let digits = value.chars().filter(char::is_ascii_digit).count();
            if digits < MIN_PHONE_DIGITS {
                diagnostics.add_warning(
                    row.number,
                    column,
                    value,
                    CheckKind::Format,
                    format!(
                        "Phone number '{}' has {} digits, expected at least {}",
                        value, digits, MIN_PHONE_DIGITS
                    ),
                );
            }
        }
    }
}

fn check_unit(column: &str, row: usize, value: &str, diagnostics: &mut Diagnostics) {
    let unit = value.to_uppercase();
    let known = UNIT_GROUPS
        .iter()
        .any(|(_, units)| units.contains(&unit.as_str()));

    if !known {
        let allowed: Vec<String> = UNIT_GROUPS
            .iter()
            .map(|(group, units)| format!("{} ({})", group, units.join(", ")))
            .collect();
        diagnostics.add_warning(
            row,
            column,
            value,
            CheckKind::AllowedValues,
            format!(
                "Unit of measure '{}' is not recognised. Allowed units: {}",
                value,
                allowed.join("; ")
            ),
        );
    }
}

fn check_collection_method(column: &str, row: &Row, value: &str, diagnostics: &mut Diagnostics) {
    let method = value.to_uppercase();
    if !COLLECTION_METHODS.contains(&method.as_str()) {
        diagnostics.add_warning(
            row.number,
            column,
            value,
            CheckKind::AllowedValues,
            format!(
                "Collection method '{}' is not recognised. Allowed methods: {}",
                value,
                COLLECTION_METHODS.join(", ")
            ),
        );
    }

    if method == CELLULAR_METHOD {
        let tags = row.value(TAG_COLUMN);
        if !tags.to_uppercase().contains(CELLULAR_TAG) {
            diagnostics.add_warning(
                row.number,
                TAG_COLUMN,
                tags,
                CheckKind::BusinessRule,
                format!(
                    "Cellular meters must include '{}' in '{}'",
                    CELLULAR_TAG, TAG_COLUMN
                ),
            );
        }
    }
}

fn check_coordinate(
    column: &str,
    row: usize,
    value: &str,
    limit: f64,
    diagnostics: &mut Diagnostics,
) {
    let parsed = value.parse::<f64>().ok().filter(|v| v.is_finite());

    match parsed {
        None => {
            diagnostics.add_error(
                row,
                column,
                value,
                CheckKind::DataType,
                format!("'{}' must be a decimal number, got '{}'", column, value),
            );
        }
        Some(coordinate) if !(-limit..=limit).contains(&coordinate) => {
            diagnostics.add_warning(
                row,
                column,
                value,
                CheckKind::Range,
                format!(
                    "'{}' value {} is outside the range -{} to {}",
                    column, coordinate, limit, limit
                ),
            );
        }
        Some(_) => {}
    }
}
