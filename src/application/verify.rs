//! Verify Use Case
//!
//! Hashes every listed file under a root directory and compares the digest
//! with the manifest entry. Optionally walks the root to find files the
//! manifest does not list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::application::load::load_manifest;
use crate::domain::entities::{AssetEntry, Manifest};
use crate::domain::ports::FileSystem;
use crate::domain::services::ValidationPolicy;
use crate::domain::value_objects::AssetUrl;
use crate::error::{ManifestError, ManifestResult};

/// Options for the verify operation
#[derive(Debug, Clone, Default)]
pub struct VerifyOptions {
    /// Directory the urls are relative to
    pub root: PathBuf,
    /// Also report files on disk that the manifest does not list
    pub unlisted: bool,
    /// Globs never reported as unlisted
    pub ignore: Vec<String>,
}

impl VerifyOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    pub fn with_unlisted(mut self, unlisted: bool) -> Self {
        self.unlisted = unlisted;
        self
    }

    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }
}

/// Outcome for one manifest entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum EntryStatus {
    Ok,
    Mismatch { expected: String, actual: String },
    Missing,
    Unsupported { algorithm: String },
}

impl EntryStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, EntryStatus::Ok)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Ok => "ok",
            EntryStatus::Mismatch { .. } => "mismatch",
            EntryStatus::Missing => "missing",
            EntryStatus::Unsupported { .. } => "unsupported",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryVerification {
    pub url: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

/// Result of the verify operation
#[derive(Debug, Clone, Default)]
pub struct VerifyResult {
    pub version: String,
    pub entries: Vec<EntryVerification>,
    /// Root-relative urls of files the manifest does not list
    pub unlisted: Vec<String>,
    /// Non-fatal findings from loading the manifest
    pub warnings: Vec<String>,
}

impl VerifyResult {
    pub fn ok_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryVerification> {
        self.entries.iter().filter(|e| !e.status.is_ok())
    }

    /// Every entry matched and nothing unlisted was found
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none() && self.unlisted.is_empty()
    }
}

/// Verify Use Case
pub struct VerifyUseCase<FS: FileSystem> {
    fs: FS,
    policy: ValidationPolicy,
}

impl<FS: FileSystem> VerifyUseCase<FS> {
    pub fn new(fs: FS, policy: ValidationPolicy) -> Self {
        Self { fs, policy }
    }

    #[instrument(skip(self, options), fields(manifest = %manifest.display(), root = %options.root.display()))]
    pub fn execute(&self, manifest: &Path, options: &VerifyOptions) -> ManifestResult<VerifyResult> {
        let loaded = load_manifest(&self.fs, manifest, &self.policy)?;
        let mut result = self.verify_manifest(&loaded.manifest, options)?;
        result.warnings = loaded.warnings(manifest);
        Ok(result)
    }

    /// Verify an already loaded manifest
    pub fn verify_manifest(
        &self,
        manifest: &Manifest,
        options: &VerifyOptions,
    ) -> ManifestResult<VerifyResult> {
        let entries = manifest
            .assets()
            .iter()
            .map(|entry| self.verify_entry(entry, &options.root))
            .collect::<ManifestResult<Vec<_>>>()?;

        let unlisted = if options.unlisted {
            find_unlisted(manifest, &options.root, &options.ignore)?
        } else {
            Vec::new()
        };

        Ok(VerifyResult {
            version: manifest.version().to_string(),
            entries,
            unlisted,
            warnings: Vec::new(),
        })
    }

    fn verify_entry(&self, entry: &AssetEntry, root: &Path) -> ManifestResult<EntryVerification> {
        let path = entry.url().to_path(root);
        let expected = entry.hash();

        let status = if !self.fs.exists(&path) {
            EntryStatus::Missing
        } else {
            match self.fs.hash(&path, expected.algorithm()) {
                Ok(Some(actual)) if actual.matches(expected) => EntryStatus::Ok,
                Ok(Some(actual)) => EntryStatus::Mismatch {
                    expected: expected.to_string(),
                    actual: actual.to_string(),
                },
                Ok(None) => EntryStatus::Unsupported {
                    algorithm: expected.algorithm().to_string(),
                },
                Err(e) if e.is_not_found() => EntryStatus::Missing,
                Err(e) => return Err(ManifestError::Fs(e)),
            }
        };

        if !status.is_ok() {
            warn!(url = %entry.url(), status = status.label(), "asset failed verification");
        }
        Ok(EntryVerification {
            url: entry.url().to_string(),
            status,
        })
    }
}

/// Walk `root` and collect files the manifest does not list
///
/// Ignore files (`.gitignore` and friends) are not honoured; only the
/// supplied globs exclude anything. Results are sorted.
pub fn find_unlisted(
    manifest: &Manifest,
    root: &Path,
    ignore: &[String],
) -> ManifestResult<Vec<String>> {
    let mut overrides = OverrideBuilder::new(root);
    for glob in ignore {
        // Override globs whitelist by default; `!` turns them into excludes
        overrides
            .add(&format!("!{}", glob))
            .map_err(|e| ManifestError::InvalidSetting {
                key: "verify.ignore".to_string(),
                message: e.to_string(),
            })?;
    }
    let overrides = overrides.build().map_err(|e| ManifestError::InvalidSetting {
        key: "verify.ignore".to_string(),
        message: e.to_string(),
    })?;

    let listed: HashSet<&str> = manifest.urls().collect();
    let mut unlisted = Vec::new();

    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .overrides(overrides)
        .build();

    for result in walker {
        let entry = result.map_err(|e| ManifestError::Io(std::io::Error::other(e.to_string())))?;
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let relative = match entry.path().strip_prefix(root) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        match AssetUrl::from_relative_path(relative) {
            Ok(url) if listed.contains(url.as_str()) => {}
            Ok(url) => unlisted.push(url.to_string()),
            Err(e) => debug!(path = %relative.display(), error = %e, "skipping unaddressable file"),
        }
    }

    unlisted.sort();
    Ok(unlisted)
}
