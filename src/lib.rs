//! Upload Validator
//!
//! Checks tabular uploads against column-level rule templates before they
//! are accepted into a downstream record system.
//!
//! This library provides:
//! - Tabular parsing with header normalization
//! - Rule templates loaded from TOML, with pre-compiled patterns
//! - A validation engine producing per-cell diagnostics and a summary
//! - Configuration for the `upload-validate` binary

pub mod config;
pub mod parser;
pub mod report;
pub mod template;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use parser::{parse_table, ParsedTable, Row};
pub use template::{CompiledTemplate, Rule, Template, TemplateError, TemplateRegistry};
pub use validation::{
    validate_reader, validate_text, CheckKind, Diagnostic, Severity, ValidationResult,
};
