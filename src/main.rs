use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};

use upload_validator::config::{Config, OutputFormat};
use upload_validator::report::render_text;
use upload_validator::template::registry::read_template_file;
use upload_validator::{
    validate_reader, CompiledTemplate, Template, TemplateRegistry, ValidationResult,
};

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether the input passed validation
fn run() -> Result<bool> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let template = select_template(&config)?;
    let compiled = if config.strict_patterns {
        CompiledTemplate::compile_strict(&template)?
    } else {
        CompiledTemplate::compile(&template)
    };

    let result = validate_input(&config, &compiled)?;

    match config.format {
        OutputFormat::Text => print!("{}", render_text(&compiled.name, &result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(result.is_valid)
}

fn select_template(config: &Config) -> Result<Template> {
    // An explicit file bypasses the registry
    if let Some(path) = &config.template_file {
        return read_template_file(path);
    }

    let registry = TemplateRegistry::with_search_dirs(&config.template_dirs)?;
    let name = config.effective_template();

    match registry.get(&name) {
        Some(loaded) => {
            log::info!(
                "Using template '{}' ({:?}{})",
                name,
                loaded.priority,
                loaded
                    .source_path
                    .as_ref()
                    .map(|p| format!(", {}", p.display()))
                    .unwrap_or_default()
            );
            Ok(loaded.template.clone())
        }
        None => Err(anyhow!(
            "Template '{}' not found. Available templates: {}",
            name,
            registry.list_templates().join(", ")
        )),
    }
}

fn validate_input(config: &Config, template: &CompiledTemplate) -> Result<ValidationResult> {
    if config.reads_stdin() {
        return Ok(validate_reader(io::stdin().lock(), template));
    }

    let file = File::open(&config.input)
        .with_context(|| format!("Failed to open input file: {}", config.input.display()))?;
    Ok(validate_reader(BufReader::new(file), template))
}
