//! Tests for layered configuration loading
//!
//! Environment variables are passed explicitly so tests do not depend on
//! (or modify) the process environment.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use branchtree::config::{local_config_path, Settings};
use branchtree::domain::OrphanPolicy;

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

#[test]
fn given_local_config_when_load_then_overrides_defaults() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "branches_file = \"/srv/branches.toml\"\nexact_match = false\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(None, Some(temp.path()), no_env()).unwrap();

    // Assert
    assert_eq!(settings.branches_file, Some(PathBuf::from("/srv/branches.toml")));
    assert!(!settings.exact_match);
    assert_eq!(settings.orphan_policy, OrphanPolicy::Drop);
}

#[test]
fn given_global_and_local_config_when_load_then_local_wins_per_field() {
    // Arrange
    let global_dir = TempDir::new().unwrap();
    let global = global_dir.path().join("branchtree.toml");
    fs::write(
        &global,
        "branches_file = \"/global.toml\"\norphan_policy = \"promote\"\n",
    )
    .unwrap();

    let local_dir = TempDir::new().unwrap();
    fs::write(
        local_config_path(local_dir.path()),
        "branches_file = \"/local.toml\"\n",
    )
    .unwrap();

    // Act
    let settings = Settings::load_from(Some(&global), Some(local_dir.path()), no_env()).unwrap();

    // Assert
    assert_eq!(settings.branches_file, Some(PathBuf::from("/local.toml")));
    assert_eq!(settings.orphan_policy, OrphanPolicy::Promote);
    assert!(settings.exact_match);
}

#[test]
fn given_env_override_when_load_then_env_wins_over_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "exact_match = false\n").unwrap();
    let env = HashMap::from([("BRANCHTREE_EXACT_MATCH".to_string(), "true".to_string())]);

    // Act
    let settings = Settings::load_from(None, Some(temp.path()), Some(env)).unwrap();

    // Assert
    assert!(settings.exact_match);
}

#[test]
fn given_missing_files_when_load_then_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let global = temp.path().join("absent.toml");

    let settings = Settings::load_from(Some(&global), Some(temp.path()), no_env()).unwrap();

    assert_eq!(settings, Settings::default());
}

#[test]
fn given_invalid_local_config_when_load_then_errors() {
    let temp = TempDir::new().unwrap();
    fs::write(local_config_path(temp.path()), "orphan_policy = \"adopt\"\n").unwrap();

    let result = Settings::load_from(None, Some(temp.path()), no_env());

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains(".branchtree.toml"));
}

#[test]
fn given_env_var_in_branches_file_when_load_then_expands_it() {
    let temp = TempDir::new().unwrap();
    fs::write(
        local_config_path(temp.path()),
        "branches_file = \"$CARGO_MANIFEST_DIR/branches.toml\"\n",
    )
    .unwrap();

    let settings = Settings::load_from(None, Some(temp.path()), no_env()).unwrap();

    assert_eq!(
        settings.branches_file,
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("branches.toml"))
    );
}

#[test]
fn given_settings_when_rendered_as_toml_then_lists_effective_values() {
    let settings = Settings {
        branches_file: Some(PathBuf::from("/srv/branches.toml")),
        exact_match: false,
        orphan_policy: OrphanPolicy::Promote,
    };

    let rendered = settings.to_toml().unwrap();

    assert!(rendered.contains("branches_file = \"/srv/branches.toml\""));
    assert!(rendered.contains("exact_match = false"));
    assert!(rendered.contains("orphan_policy = \"promote\""));
}
