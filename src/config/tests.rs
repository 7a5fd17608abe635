//! Tests for the config module

use super::loader::{load, load_with_warnings, with_env_overrides};
use super::types::*;
use crate::domain::services::DuplicateHashPolicy;
use crate::domain::value_objects::HashAlgorithm;
use crate::infrastructure::ManifestFormat;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(
        config.check.allowed_algorithms,
        vec!["sha256", "sha384", "sha512"]
    );
    assert_eq!(config.check.duplicate_hashes, DuplicateHashPolicy::Warn);
    assert_eq!(config.store.dir, PathBuf::from(".swmanifest"));
    assert!(config.store.trust_version);
    assert_eq!(config.output.format, ManifestFormat::Script);
    assert!(config.verify.ignore.contains(&"*.br".to_string()));
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[check]
allowed_algorithms = ["sha256"]
duplicate_hashes = "deny"

[verify]
ignore = ["*.map"]

[store]
dir = "state"
trust_version = false

[output]
format = "json"
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.check.allowed_algorithms, vec!["sha256"]);
    assert_eq!(config.check.duplicate_hashes, DuplicateHashPolicy::Deny);
    assert_eq!(config.verify.ignore, vec!["*.map"]);
    assert_eq!(config.store.dir, PathBuf::from("state"));
    assert!(!config.store.trust_version);
    assert_eq!(config.output.format, ManifestFormat::Json);
}

#[test]
fn test_config_partial_sections_keep_defaults() {
    let config: Config = toml::from_str("[store]\ndir = \"x\"\n").unwrap();

    assert!(config.store.trust_version);
    assert_eq!(config.check, CheckConfig::default());
}

#[test]
fn test_validation_policy_from_config() {
    let mut config = Config::default();
    config.check.allowed_algorithms = vec!["SHA256".to_string(), " sha512 ".to_string()];
    config.check.duplicate_hashes = DuplicateHashPolicy::Allow;

    let policy = config.validation_policy().unwrap();
    assert_eq!(
        policy.allowed_algorithms,
        vec![HashAlgorithm::Sha256, HashAlgorithm::Sha512]
    );
    assert_eq!(policy.duplicate_hashes, DuplicateHashPolicy::Allow);
}

#[test]
fn test_validation_policy_rejects_bad_algorithm_name() {
    let mut config = Config::default();
    config.check.allowed_algorithms = vec!["sha-256".to_string()];
    assert!(config.validation_policy().is_err());
}

#[test]
fn test_load_with_warnings_reports_unknown_keys() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("swmanifest.toml");
    fs::write(&path, "[store]\ndir = \"s\"\ntrust_verison = true\n").unwrap();

    let (config, warnings) = load_with_warnings(&path).unwrap();

    assert_eq!(config.store.dir, PathBuf::from("s"));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].key, "trust_verison");
    assert_eq!(warnings[0].line, Some(3));
    assert_eq!(warnings[0].suggestion.as_deref(), Some("trust_version"));
}

#[test]
fn test_load_with_warnings_invalid_toml_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("swmanifest.toml");
    fs::write(&path, "[store\n").unwrap();

    assert!(load_with_warnings(&path).is_err());
}

#[test]
fn test_load_prefers_project_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("swmanifest.toml"),
        "[output]\nformat = \"json\"\n",
    )
    .unwrap();

    let loaded = load(None, dir.path()).unwrap();
    assert_eq!(loaded.config.output.format, ManifestFormat::Json);
    assert_eq!(loaded.source, Some(dir.path().join("swmanifest.toml")));
}

#[test]
fn test_load_explicit_missing_file_is_error() {
    let dir = tempdir().unwrap();
    assert!(load(Some(&dir.path().join("missing.toml")), dir.path()).is_err());
}

#[test]
fn test_env_overrides() {
    let config = with_env_overrides(
        Config::default(),
        env(&[
            ("SWMANIFEST_STORE_DIR", "/var/lib/sw"),
            ("SWMANIFEST_ALLOWED_ALGORITHMS", "sha384, SHA512"),
            ("SWMANIFEST_TRUST_VERSION", "0"),
            ("SWMANIFEST_OUTPUT_FORMAT", "json"),
        ]),
    );

    assert_eq!(config.store.dir, PathBuf::from("/var/lib/sw"));
    assert_eq!(config.check.allowed_algorithms, vec!["sha384", "sha512"]);
    assert!(!config.store.trust_version);
    assert_eq!(config.output.format, ManifestFormat::Json);
}

#[test]
fn test_env_overrides_ignore_garbage() {
    let config = with_env_overrides(
        Config::default(),
        env(&[
            ("SWMANIFEST_STORE_DIR", ""),
            ("SWMANIFEST_ALLOWED_ALGORITHMS", " , "),
            ("SWMANIFEST_OUTPUT_FORMAT", "yaml"),
        ]),
    );

    assert_eq!(config, Config::default());
}
