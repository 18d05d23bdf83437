//! Tests for loading templates from directories
use std::fs;

use tempfile::TempDir;
use upload_validator::template::{TemplatePriority, TemplateRegistry};

const CUSTOM_TEMPLATE: &str = r#"
[template]
name = "gas-only"
description = "Gas meter uploads"

[[rules]]
column = "meter_id"
required = true
unique = true

[[rules]]
column = "uom"
required = true
"#;

const OVERRIDE_TEMPLATE: &str = r#"
[template]
name = "meter-readings"

[[rules]]
column = "ACCOUNT_NUMBER"
required = true
"#;

#[test]
fn test_load_templates_from_directory() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("gas.toml"), CUSTOM_TEMPLATE).unwrap();
    fs::write(dir.path().join("notes.txt"), "not a template").unwrap();

    let dirs = [(dir.path().to_path_buf(), TemplatePriority::UserGlobal)];
    let registry = TemplateRegistry::with_search_dirs(&dirs).expect("load registry");

    assert_eq!(registry.list_templates(), vec!["gas-only", "meter-readings"]);

    let gas = registry.get("gas-only").expect("custom template");
    assert_eq!(gas.priority, TemplatePriority::UserGlobal);
    assert_eq!(
        gas.source_path.as_deref(),
        Some(dir.path().join("gas.toml").as_path())
    );
    assert_eq!(gas.template.rules.len(), 2);
    assert_eq!(gas.template.rules[0].column, "METER_ID");
}

#[test]
fn test_workspace_template_overrides_builtin() {
    let global = TempDir::new().expect("temp dir");
    let workspace = TempDir::new().expect("temp dir");
    fs::write(workspace.path().join("meter.toml"), OVERRIDE_TEMPLATE).unwrap();

    let registry = TemplateRegistry::with_search_dirs(&[
        (global.path().to_path_buf(), TemplatePriority::UserGlobal),
        (workspace.path().to_path_buf(), TemplatePriority::Workspace),
    ])
    .expect("load registry");

    let loaded = registry.get("meter-readings").expect("template");
    assert_eq!(loaded.priority, TemplatePriority::Workspace);
    assert_eq!(loaded.template.rules.len(), 1);
}

#[test]
fn test_priority_comes_from_the_directory_not_its_position() {
    let workspace = TempDir::new().expect("temp dir");
    let global = TempDir::new().expect("temp dir");
    fs::write(workspace.path().join("meter.toml"), OVERRIDE_TEMPLATE).unwrap();
    fs::write(
        global.path().join("meter.toml"),
        "[template]\nname = \"meter-readings\"\n[[rules]]\ncolumn = \"A\"\n",
    )
    .unwrap();

    let registry = TemplateRegistry::with_search_dirs(&[
        (workspace.path().to_path_buf(), TemplatePriority::Workspace),
        (global.path().to_path_buf(), TemplatePriority::UserGlobal),
    ])
    .expect("load registry");

    let loaded = registry.get("meter-readings").expect("template");
    assert_eq!(loaded.priority, TemplatePriority::Workspace);
    assert_eq!(loaded.template.rules[0].column, "ACCOUNT_NUMBER");
}

#[test]
fn test_broken_template_file_is_skipped() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("broken.toml"), "[template\nname = ").unwrap();
    fs::write(
        dir.path().join("dup.toml"),
        "[template]\nname = \"dup\"\n[[rules]]\ncolumn = \"a\"\n[[rules]]\ncolumn = \"A\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("gas.toml"), CUSTOM_TEMPLATE).unwrap();

    let mut registry = TemplateRegistry::new();
    let loaded = registry
        .load_directory(dir.path(), TemplatePriority::Workspace)
        .expect("directory loads");

    assert_eq!(loaded, 1);
    assert!(registry.get("gas-only").is_some());
    assert!(registry.get("dup").is_none());
}

#[test]
fn test_load_single_file_reports_errors() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "not = [valid").unwrap();

    let mut registry = TemplateRegistry::new();
    let err = registry
        .load_template_file(&path, TemplatePriority::Workspace)
        .unwrap_err();
    assert!(format!("{:#}", err).contains("broken.toml"));
}
