//! Validation Engine
//!
//! Column matching, per-cell rule evaluation, domain checks and result
//! aggregation. Pure functions of (text, template); no I/O.

pub mod columns;
pub mod domain;
pub mod engine;
pub mod result;
pub mod rules;
pub mod uniqueness;

pub use columns::ColumnMatch;
pub use engine::{validate_reader, validate_table, validate_text, ValidationSession};
pub use result::{CheckKind, Diagnostic, Severity, ValidationResult};
