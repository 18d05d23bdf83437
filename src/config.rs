//! Configuration management for the upload validator.
//!
//! Handles:
//! - Command-line argument parsing
//! - Template directory configuration

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::template::registry::DEFAULT_TEMPLATE;
use crate::template::TemplatePriority;

/// Report format written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments for the upload validator
#[derive(Debug, Parser)]
#[command(name = "upload-validate")]
#[command(about = "Check a tabular upload against a column rule template")]
#[command(version)]
pub struct Args {
    /// File to validate
    #[arg(help = "CSV file to validate, or '-' to read stdin")]
    pub input: PathBuf,

    /// Name of a registered template
    #[arg(long, help = "Template name (e.g., 'meter-readings')")]
    pub template: Option<String>,

    /// Template file to use instead of a registered template
    #[arg(long, conflicts_with = "template", help = "Path to a template TOML file")]
    pub template_file: Option<PathBuf>,

    /// Extra directory to search for templates
    #[arg(long, help = "Directory containing template TOML files")]
    pub template_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    /// Reject templates whose patterns fail to compile
    #[arg(
        long,
        help = "Fail on invalid rule patterns instead of skipping those checks"
    )]
    pub strict_patterns: bool,

    #[arg(
        long,
        default_value = "warn",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Input path; `-` means stdin
    pub input: PathBuf,
    /// Template name explicitly set via command line
    pub cli_template: Option<String>,
    /// Template file explicitly set via command line
    pub template_file: Option<PathBuf>,
    /// Template directories to search, lowest priority first
    /// Search directories in load order; later entries override earlier ones
    pub template_dirs: Vec<(PathBuf, TemplatePriority)>,
    pub format: OutputFormat,
    pub strict_patterns: bool,
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        let mut template_dirs = Vec::new();

        // User config directory: ~/.config/upload-validator/templates/
        if let Some(config_dir) = dirs::config_dir() {
            template_dirs.push((
                config_dir.join("upload-validator").join("templates"),
                TemplatePriority::UserGlobal,
            ));
        }

        // Workspace directory: ./.upload-validator/templates/
        let workspace_dir = std::env::current_dir()?
            .join(".upload-validator")
            .join("templates");
        template_dirs.push((workspace_dir, TemplatePriority::Workspace));

        // User-specified directory loads last so it wins over both
        if let Some(custom_dir) = args.template_dir {
            template_dirs.push((custom_dir, TemplatePriority::Workspace));
        }

        Ok(Config {
            input: args.input,
            cli_template: args.template,
            template_file: args.template_file,
            template_dirs,
            format: args.format,
            strict_patterns: args.strict_patterns,
            log_level: args.log_level,
        })
    }

    /// Get the effective template name
    pub fn effective_template(&self) -> String {
        self.cli_template
            .clone()
            .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string())
    }

    /// Whether the input should be read from stdin
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == "-"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let args = Args::try_parse_from(args.iter().copied()).expect("valid arguments");
        Config::from_args(args).expect("config")
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["upload-validate", "readings.csv"]);
        assert_eq!(config.input, PathBuf::from("readings.csv"));
        assert_eq!(config.effective_template(), DEFAULT_TEMPLATE);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.strict_patterns);
        assert_eq!(config.log_level, "warn");
        assert!(!config.reads_stdin());
    }

    #[test]
    fn test_custom_dir_loads_last_with_workspace_priority() {
        let config = parse(&[
            "upload-validate",
            "-",
            "--template-dir",
            "/srv/templates",
            "--template",
            "custom",
            "--format",
            "json",
            "--strict-patterns",
        ]);
        assert!(config.reads_stdin());
        assert_eq!(config.effective_template(), "custom");
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.strict_patterns);
        assert_eq!(
            config.template_dirs.last(),
            Some(&(PathBuf::from("/srv/templates"), TemplatePriority::Workspace))
        );
    }

    #[test]
    fn test_workspace_dir_priority_does_not_depend_on_position() {
        let config = parse(&["upload-validate", "readings.csv"]);
        let workspace = config
            .template_dirs
            .iter()
            .find(|(dir, _)| dir.ends_with(".upload-validator/templates"))
            .expect("workspace directory");
        assert_eq!(workspace.1, TemplatePriority::Workspace);
    }

    #[test]
    fn test_template_and_file_conflict() {
        let result = Args::try_parse_from([
            "upload-validate",
            "in.csv",
            "--template",
            "a",
            "--template-file",
            "b.toml",
        ]);
        assert!(result.is_err());
    }
}
