//! Differ Domain Service
//!
//! Computes the add / update / remove set between a previously stored
//! manifest and a freshly published one.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::entities::{AssetEntry, Manifest};

/// Kind of change for one url
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

impl ChangeKind {
    pub fn symbol(&self) -> char {
        match self {
            ChangeKind::Added => '+',
            ChangeKind::Updated => '~',
            ChangeKind::Removed => '-',
        }
    }
}

/// A single changed asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetChange {
    pub kind: ChangeKind,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_hash: Option<String>,
}

impl AssetChange {
    fn added(entry: &AssetEntry) -> Self {
        Self {
            kind: ChangeKind::Added,
            url: entry.url().to_string(),
            old_hash: None,
            new_hash: Some(entry.hash().to_string()),
        }
    }

    fn updated(old: &AssetEntry, new: &AssetEntry) -> Self {
        Self {
            kind: ChangeKind::Updated,
            url: new.url().to_string(),
            old_hash: Some(old.hash().to_string()),
            new_hash: Some(new.hash().to_string()),
        }
    }

    fn removed(entry: &AssetEntry) -> Self {
        Self {
            kind: ChangeKind::Removed,
            url: entry.url().to_string(),
            old_hash: Some(entry.hash().to_string()),
            new_hash: None,
        }
    }
}

/// Result of comparing two manifests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManifestDiff {
    pub old_version: Option<String>,
    pub new_version: String,
    /// In new manifest order
    pub added: Vec<AssetChange>,
    /// In new manifest order
    pub updated: Vec<AssetChange>,
    /// In old manifest order
    pub removed: Vec<AssetChange>,
    pub unchanged: usize,
}

impl ManifestDiff {
    /// Nothing to fetch or evict
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    pub fn version_changed(&self) -> bool {
        self.old_version.as_deref() != Some(self.new_version.as_str())
    }

    /// Content changed while the version stayed the same
    pub fn stale_version(&self) -> bool {
        !self.is_empty() && !self.version_changed()
    }

    /// All changes: added, updated, then removed
    pub fn changes(&self) -> impl Iterator<Item = &AssetChange> {
        self.added
            .iter()
            .chain(self.updated.iter())
            .chain(self.removed.iter())
    }

    /// Urls the consumer has to fetch (added and updated)
    pub fn to_fetch(&self) -> impl Iterator<Item = &str> {
        self.added
            .iter()
            .chain(self.updated.iter())
            .map(|c| c.url.as_str())
    }

    /// Urls the consumer has to evict
    pub fn to_evict(&self) -> impl Iterator<Item = &str> {
        self.removed.iter().map(|c| c.url.as_str())
    }

    /// Get a short summary (e.g., "+2 ~1 -0 =40")
    pub fn summary(&self) -> String {
        format!(
            "+{} ~{} -{} ={}",
            self.added.len(),
            self.updated.len(),
            self.removed.len(),
            self.unchanged
        )
    }
}

/// Outcome of the cheap version comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickCheck {
    UpToDate,
    NeedsDiff,
}

/// Differ service for comparing manifests
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ;

impl Differ {
    pub fn new() -> Self {
        Self
    }

    /// Compare versions only
    pub fn quick_check(&self, old: &Manifest, new: &Manifest) -> QuickCheck {
        if old.version() == new.version() {
            QuickCheck::UpToDate
        } else {
            QuickCheck::NeedsDiff
        }
    }

    /// Full comparison; `old` is `None` when nothing was stored before
    pub fn diff(&self, old: Option<&Manifest>, new: &Manifest) -> ManifestDiff {
        let old_by_url: HashMap<&str, &AssetEntry> = old
            .map(|m| m.assets().iter().map(|e| (e.url().as_str(), e)).collect())
            .unwrap_or_default();

        let mut result = ManifestDiff {
            old_version: old.map(|m| m.version().to_string()),
            new_version: new.version().to_string(),
            ..ManifestDiff::default()
        };

        for entry in new.assets() {
            match old_by_url.get(entry.url().as_str()) {
                None => result.added.push(AssetChange::added(entry)),
                Some(previous) if !previous.hash().matches(entry.hash()) => {
                    result.updated.push(AssetChange::updated(previous, entry))
                }
                Some(_) => result.unchanged += 1,
            }
        }

        if let Some(old) = old {
            let new_urls: HashSet<&str> = new.urls().collect();
            result.removed = old
                .assets()
                .iter()
                .filter(|e| !new_urls.contains(e.url().as_str()))
                .map(AssetChange::removed)
                .collect();
        }

        result
    }
}
