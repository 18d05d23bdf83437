//! Compiled Templates
//!
//! Patterns are compiled once per template, never per cell.

use regex::Regex;

use super::schema::{Rule, Template};
use super::TemplateError;

/// State of a rule's pattern check
#[derive(Debug, Clone)]
pub enum PatternCheck {
    /// Rule declares no pattern
    None,
    /// Pattern compiled and anchored to the whole value
    Active(Regex),
    /// Pattern failed to compile; the check is skipped
    Disabled { reason: String },
}

/// A rule together with its compiled pattern
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub rule: Rule,
    pub pattern: PatternCheck,
}

impl CompiledRule {
    /// Whether a non-empty value satisfies the pattern.
    ///
    /// Returns `true` when there is no active pattern.
    pub fn matches_pattern(&self, value: &str) -> bool {
        match &self.pattern {
            PatternCheck::Active(re) => re.is_match(value),
            PatternCheck::None | PatternCheck::Disabled { .. } => true,
        }
    }
}

/// A template ready for validation
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    pub name: String,
    pub rules: Vec<CompiledRule>,
}

impl CompiledTemplate {
    /// Compile a template, disabling any pattern that fails to compile.
    ///
    /// Disabled patterns produce no diagnostics; they are logged here and
    /// listed by [`CompiledTemplate::disabled_patterns`].
    pub fn compile(template: &Template) -> Self {
        let rules = template
            .rules
            .iter()
            .map(|rule| {
                let pattern = match compile_pattern(rule) {
                    Ok(Some(re)) => PatternCheck::Active(re),
                    Ok(None) => PatternCheck::None,
                    Err(e) => {
                        log::warn!(
                            "Template '{}': pattern for column '{}' disabled: {}",
                            template.name,
                            rule.column,
                            e
                        );
                        PatternCheck::Disabled {
                            reason: e.to_string(),
                        }
                    }
                };
                CompiledRule {
                    rule: rule.clone(),
                    pattern,
                }
            })
            .collect();

        Self {
            name: template.name.clone(),
            rules,
        }
    }

    /// Compile a template, rejecting it if any pattern fails to compile
    pub fn compile_strict(template: &Template) -> Result<Self, TemplateError> {
        let mut rules = Vec::with_capacity(template.rules.len());

        for rule in &template.rules {
            let pattern = match compile_pattern(rule) {
                Ok(Some(re)) => PatternCheck::Active(re),
                Ok(None) => PatternCheck::None,
                Err(source) => {
                    return Err(TemplateError::InvalidPattern {
                        column: rule.column.clone(),
                        source,
                    });
                }
            };
            rules.push(CompiledRule {
                rule: rule.clone(),
                pattern,
            });
        }

        Ok(Self {
            name: template.name.clone(),
            rules,
        })
    }

    /// Columns whose pattern check was disabled during compilation
    pub fn disabled_patterns(&self) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|compiled| matches!(compiled.pattern, PatternCheck::Disabled { .. }))
            .map(|compiled| compiled.rule.column.as_str())
            .collect()
    }
}

fn compile_pattern(rule: &Rule) -> Result<Option<Regex>, regex::Error> {
    match rule.pattern.as_deref() {
        Some(pattern) if !pattern.is_empty() => {
            // Wrapping an unbalanced pattern can yield a valid but unanchored regex
            Regex::new(pattern)?;
            Regex::new(&format!("^(?:{})$", pattern)).map(Some)
        }
        _ => Ok(None),
    }
}
