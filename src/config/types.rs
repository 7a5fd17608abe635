//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::services::{DuplicateHashPolicy, ValidationPolicy};
use crate::domain::value_objects::HashAlgorithm;
use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::{ManifestFormat, DEFAULT_STORE_DIR};

use super::loader::{self, ConfigWarning};

/// Validation rules for `check` and for every decoded manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConfig {
    #[serde(default = "default_allowed_algorithms")]
    pub allowed_algorithms: Vec<String>,

    #[serde(default)]
    pub duplicate_hashes: DuplicateHashPolicy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            allowed_algorithms: default_allowed_algorithms(),
            duplicate_hashes: DuplicateHashPolicy::default(),
        }
    }
}

fn default_allowed_algorithms() -> Vec<String> {
    vec!["sha256".into(), "sha384".into(), "sha512".into()]
}

/// Settings for `verify --unlisted`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyConfig {
    /// Globs (relative to the root) never reported as unlisted
    #[serde(default = "default_verify_ignore")]
    pub ignore: Vec<String>,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            ignore: default_verify_ignore(),
        }
    }
}

fn default_verify_ignore() -> Vec<String> {
    // Precompressed siblings and the manifest itself are never listed
    vec![
        "service-worker-assets.js".into(),
        "*.br".into(),
        "*.gz".into(),
    ]
}

/// Where `plan` keeps the last accepted manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,

    /// Skip the full diff when stored and new versions match
    #[serde(default = "default_true")]
    pub trust_version: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            trust_version: true,
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_DIR)
}

fn default_true() -> bool {
    true
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default format for `convert`
    #[serde(default)]
    pub format: ManifestFormat,
}

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub verify: VerifyConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> ManifestResult<Self> {
        Ok(loader::load_with_warnings(path)?.0)
    }

    /// Load configuration and collect non-fatal warnings
    pub fn load_with_warnings(path: &Path) -> ManifestResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Build the validator policy from `[check]`
    pub fn validation_policy(&self) -> ManifestResult<ValidationPolicy> {
        let allowed_algorithms = self
            .check
            .allowed_algorithms
            .iter()
            .map(|name| {
                name.trim()
                    .to_lowercase()
                    .parse::<HashAlgorithm>()
                    .map_err(|e| ManifestError::InvalidSetting {
                        key: "check.allowed_algorithms".to_string(),
                        message: e.to_string(),
                    })
            })
            .collect::<ManifestResult<Vec<_>>>()?;

        Ok(ValidationPolicy {
            allowed_algorithms,
            duplicate_hashes: self.check.duplicate_hashes,
        })
    }
}
