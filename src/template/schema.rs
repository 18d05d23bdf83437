//! Template Schema Types
//!
//! Rule and template definitions as authored in TOML, plus the runtime
//! `Template` with normalized column names.

use std::collections::HashSet;

use serde::Deserialize;

use super::TemplateError;
use crate::parser::normalize_column_name;

/// Root template file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TemplateFile {
    pub template: TemplateMeta,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Template metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TemplateMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Declared data type of a column
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
    Email,
}

/// One column's validation contract
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Rule {
    pub column: String,
    /// Display position only, never enforced
    pub position: Option<u32>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub allow_blank: bool,
    #[serde(default)]
    pub unique: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    #[serde(default)]
    pub data_type: DataType,
    pub pattern: Option<String>,
    pub invalid_characters: Option<String>,
    pub notes: Option<String>,
    pub example: Option<String>,
}

impl Rule {
    /// Optional text column with no constraints
    pub fn new(column: &str) -> Self {
        Self {
            column: column.to_string(),
            position: None,
            required: false,
            allow_blank: false,
            unique: false,
            min_length: None,
            max_length: None,
            data_type: DataType::Text,
            pattern: None,
            invalid_characters: None,
            notes: None,
            example: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn pattern(mut self, pattern: &str) -> Self {
        self.pattern = Some(pattern.to_string());
        self
    }

    pub fn invalid_characters(mut self, chars: &str) -> Self {
        self.invalid_characters = Some(chars.to_string());
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Runtime template: ordered rules keyed by normalized column name
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub rules: Vec<Rule>,
}

impl Template {
    /// Build a template, normalizing column names and rejecting duplicates
    pub fn new(name: &str, rules: Vec<Rule>) -> Result<Self, TemplateError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());

        for mut rule in rules {
            rule.column = normalize_column_name(&rule.column);
            if rule.column.is_empty() {
                return Err(TemplateError::EmptyColumn {
                    template: name.to_string(),
                });
            }
            if !seen.insert(rule.column.clone()) {
                return Err(TemplateError::DuplicateColumn {
                    template: name.to_string(),
                    column: rule.column,
                });
            }
            normalized.push(rule);
        }

        Ok(Self {
            name: name.to_string(),
            version: None,
            description: None,
            rules: normalized,
        })
    }

    /// Parse a TOML template document
    pub fn from_toml(content: &str) -> Result<Self, TemplateError> {
        let file: TemplateFile = toml::from_str(content)?;
        Self::try_from(file)
    }
}

impl TryFrom<TemplateFile> for Template {
    type Error = TemplateError;

    fn try_from(file: TemplateFile) -> Result<Self, Self::Error> {
        let mut template = Template::new(&file.template.name, file.rules)?;
        template.version = file.template.version;
        template.description = file.template.description;
        Ok(template)
    }
}
