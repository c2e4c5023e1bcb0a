use crate::cli::conf::{config_error_hint, summary, write_template};
use crate::conf::{ConfigError, WaflensConfig, load_config};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn written_template_loads_as_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("conf").join("waflens.hcl");

    write_template(&path).unwrap();

    assert_eq!(load_config(&path).unwrap(), WaflensConfig::default());
}

#[test]
fn template_is_never_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("waflens.hcl");
    std::fs::write(&path, "# mine").unwrap();

    let err = write_template(&path).unwrap_err();

    assert!(err.to_string().contains("already exists"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");
}

#[test]
fn summary_reports_effective_settings() {
    let out = summary(&WaflensConfig::default());

    assert!(out.starts_with("✔ Config loaded successfully\n"));
    assert!(out.contains("✔ sample threshold: 5000\n"));
    assert!(out.contains("✔ 4 header names extracted from httpRequest.headers\n"));
    assert!(out.contains("✔ default sort: timestamp desc\n"));
}

#[test]
fn hints_cover_value_errors() {
    assert!(config_error_hint(&ConfigError::InvalidWorkers).is_some());
    assert!(config_error_hint(&ConfigError::EmptyPath { field: "timestamp_field" }).is_none());
}
