//! Template Registry
//!
//! In-memory rule store: built-in templates plus TOML files from the
//! configured search directories.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::schema::Template;

/// Name of the template used when none is selected
pub const DEFAULT_TEMPLATE: &str = "meter-readings";

const EMBEDDED_METER_READINGS: &str =
    include_str!("../../resources/templates/meter-readings.toml");

/// Represents the loading priority of templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TemplatePriority {
    BuiltIn = 0,
    UserGlobal = 1,
    Workspace = 2,
}

/// A loaded template with its source and priority
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub template: Template,
    pub priority: TemplatePriority,
    pub source_path: Option<PathBuf>,
}

/// Simple in-memory template registry
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, LoadedTemplate>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in templates and everything found in `dirs`,
    /// loaded in order with each directory's own priority
    pub fn with_search_dirs(dirs: &[(PathBuf, TemplatePriority)]) -> Result<Self> {
        let mut registry = Self::new();
        registry.add_embedded_templates();

        for (dir, priority) in dirs {
            registry.load_directory(dir, *priority)?;
        }

        log::debug!("Loaded {} templates", registry.templates.len());
        Ok(registry)
    }

    /// Add a template unless a higher-priority one with the same name exists.
    ///
    /// Returns whether the template was stored.
    pub fn add_template(
        &mut self,
        template: Template,
        priority: TemplatePriority,
        source_path: Option<PathBuf>,
    ) -> bool {
        let should_load = match self.templates.get(&template.name) {
            Some(existing) => priority >= existing.priority,
            None => true,
        };

        if should_load {
            self.templates.insert(
                template.name.clone(),
                LoadedTemplate {
                    template,
                    priority,
                    source_path,
                },
            );
        }

        should_load
    }

    /// Get a template by name
    pub fn get(&self, name: &str) -> Option<&LoadedTemplate> {
        self.templates.get(name)
    }

    /// List all available template names, sorted
    pub fn list_templates(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Add the templates embedded in the binary
    pub fn add_embedded_templates(&mut self) {
        match Template::from_toml(EMBEDDED_METER_READINGS) {
            Ok(template) => {
                self.add_template(template, TemplatePriority::BuiltIn, None);
            }
            Err(e) => {
                log::warn!("Failed to parse embedded '{}' template: {}", DEFAULT_TEMPLATE, e);
            }
        }
    }

    /// Load every `*.toml` template in a directory.
    ///
    /// A missing directory is not an error. Files that fail to parse are
    /// logged and skipped. Returns the number of templates stored.
    pub fn load_directory(&mut self, dir: &Path, priority: TemplatePriority) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read template directory: {}", dir.display()))?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("toml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_template_file(&path, priority) {
                Ok(true) => loaded += 1,
                Ok(false) => {}
                Err(e) => log::warn!("Skipping template file {}: {:#}", path.display(), e),
            }
        }

        Ok(loaded)
    }

    /// Load a single template file; returns whether it was stored
    pub fn load_template_file(&mut self, path: &Path, priority: TemplatePriority) -> Result<bool> {
        let template = read_template_file(path)?;
        Ok(self.add_template(template, priority, Some(path.to_path_buf())))
    }
}

/// Read and parse a template file without registering it
pub fn read_template_file(path: &Path) -> Result<Template> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template file: {}", path.display()))?;

    Template::from_toml(&content)
        .with_context(|| format!("Failed to parse template TOML: {}", path.display()))
}
