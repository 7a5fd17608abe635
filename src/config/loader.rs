//! Configuration loading
//!
//! Precedence (highest first):
//! 1. `--config PATH`
//! 2. `./swmanifest.toml`
//! 3. `<user config dir>/swmanifest/config.toml`
//! 4. Built-in defaults
//!
//! Environment overrides (`SWMANIFEST_*`) are applied on top of whichever
//! file won.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::ManifestFormat;

use super::types::Config;

/// Project-level config file name
pub const PROJECT_CONFIG_FILE: &str = "swmanifest.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Configuration plus where it came from
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: Option<PathBuf>,
    pub warnings: Vec<ConfigWarning>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> ManifestResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| ManifestError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve and load configuration
///
/// An explicit path must exist; the implicit locations are optional.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> ManifestResult<LoadedConfig> {
    let candidate = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let project = cwd.join(PROJECT_CONFIG_FILE);
            if project.is_file() {
                Some(project)
            } else {
                user_config_path().filter(|p| p.is_file())
            }
        }
    };

    let mut loaded = LoadedConfig::default();
    if let Some(path) = candidate {
        let (config, warnings) = load_with_warnings(&path)?;
        debug!(path = %path.display(), "loaded config");
        loaded = LoadedConfig {
            config,
            source: Some(path),
            warnings,
        };
    }

    loaded.config = with_env_overrides(loaded.config, |key| std::env::var(key).ok());
    loaded.config.validation_policy()?;
    Ok(loaded)
}

/// User-level config file location
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("swmanifest").join("config.toml"))
}

/// Apply environment variable overrides (SWMANIFEST_* prefix)
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // SWMANIFEST_STORE_DIR
    if let Some(dir) = lookup("SWMANIFEST_STORE_DIR").filter(|d| !d.is_empty()) {
        config.store.dir = PathBuf::from(dir);
    }

    // SWMANIFEST_ALLOWED_ALGORITHMS (comma-separated)
    if let Some(list) = lookup("SWMANIFEST_ALLOWED_ALGORITHMS") {
        let parsed: Vec<String> = list
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if !parsed.is_empty() {
            config.check.allowed_algorithms = parsed;
        }
    }

    // SWMANIFEST_TRUST_VERSION
    if let Some(val) = lookup("SWMANIFEST_TRUST_VERSION") {
        config.store.trust_version = val.to_lowercase() != "false" && val != "0";
    }

    // SWMANIFEST_OUTPUT_FORMAT
    if let Some(format) = lookup("SWMANIFEST_OUTPUT_FORMAT") {
        match format.to_lowercase().as_str() {
            "json" => config.output.format = ManifestFormat::Json,
            "script" | "js" => config.output.format = ManifestFormat::Script,
            _ => {}
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "check",
        "allowed_algorithms",
        "duplicate_hashes",
        "verify",
        "ignore",
        "store",
        "dir",
        "trust_version",
        "output",
        "format",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
