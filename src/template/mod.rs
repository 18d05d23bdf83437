//! Rule Templates
//!
//! Template definitions, pre-compiled patterns and the template registry.

pub mod compiled;
pub mod registry;
pub mod schema;

pub use compiled::{CompiledRule, CompiledTemplate, PatternCheck};
pub use registry::{LoadedTemplate, TemplatePriority, TemplateRegistry};
pub use schema::{DataType, Rule, Template, TemplateFile, TemplateMeta};

use thiserror::Error;

/// Errors raised while building or compiling a template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Two rules normalize to the same column name
    #[error("template '{template}' declares column '{column}' more than once")]
    DuplicateColumn { template: String, column: String },

    /// A rule has a blank column name
    #[error("template '{template}' has a rule with an empty column name")]
    EmptyColumn { template: String },

    /// A rule's pattern does not compile (strict compilation only)
    #[error("invalid pattern for column '{column}': {source}")]
    InvalidPattern {
        column: String,
        #[source]
        source: regex::Error,
    },

    /// The template document is not valid TOML for a template
    #[error("failed to parse template TOML: {0}")]
    Parse(#[from] toml::de::Error),
}
