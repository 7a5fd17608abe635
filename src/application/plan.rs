//! Plan Use Case
//!
//! Compares a freshly published manifest with the one accepted last time
//! and reports what a consumer has to fetch and evict. With `commit`, the
//! new manifest replaces the stored one.

use std::path::Path;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::application::load::load_manifest;
use crate::domain::ports::{FileSystem, ManifestStore};
use crate::domain::services::{Differ, ManifestDiff, QuickCheck, ValidationPolicy};
use crate::error::ManifestResult;

/// Store name used when none is given
pub const DEFAULT_PLAN_NAME: &str = "default";

/// Options for the plan operation
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Stored manifest to compare against
    pub name: String,
    /// Save the new manifest as the stored one
    pub commit: bool,
    /// Always run the full diff, even when versions match
    pub full: bool,
    /// Trust matching versions to mean matching content
    pub trust_version: bool,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            name: DEFAULT_PLAN_NAME.to_string(),
            commit: false,
            full: false,
            trust_version: true,
        }
    }
}

impl PlanOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_commit(mut self, commit: bool) -> Self {
        self.commit = commit;
        self
    }

    pub fn with_full(mut self, full: bool) -> Self {
        self.full = full;
        self
    }

    pub fn with_trust_version(mut self, trust_version: bool) -> Self {
        self.trust_version = trust_version;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlanStatus {
    /// Nothing stored yet; everything is added
    Initial,
    /// Versions match and were trusted; no diff was run
    UpToDate,
    /// The diff found changes
    Changed,
    /// The diff found no changes
    Unchanged,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Initial => "initial",
            PlanStatus::UpToDate => "up-to-date",
            PlanStatus::Changed => "changed",
            PlanStatus::Unchanged => "unchanged",
        }
    }
}

/// Result of the plan operation
#[derive(Debug, Clone)]
pub struct PlanResult {
    pub name: String,
    pub status: PlanStatus,
    pub diff: ManifestDiff,
    /// Whether the stored manifest was replaced
    pub committed: bool,
    /// Non-fatal findings from loading the manifest
    pub warnings: Vec<String>,
}

/// Plan Use Case
pub struct PlanUseCase<S: ManifestStore, FS: FileSystem> {
    store: S,
    fs: FS,
    policy: ValidationPolicy,
    differ: Differ,
}

impl<S: ManifestStore, FS: FileSystem> PlanUseCase<S, FS> {
    pub fn new(store: S, fs: FS, policy: ValidationPolicy) -> Self {
        Self {
            store,
            fs,
            policy,
            differ: Differ::new(),
        }
    }

    #[instrument(skip(self, options), fields(manifest = %manifest.display(), name = %options.name))]
    pub fn execute(&self, manifest: &Path, options: &PlanOptions) -> ManifestResult<PlanResult> {
        let loaded = load_manifest(&self.fs, manifest, &self.policy)?;
        let warnings = loaded.warnings(manifest);
        let new = loaded.manifest;
        let stored = self.store.load(&options.name)?;

        let (status, diff) = match &stored {
            None => (PlanStatus::Initial, self.differ.diff(None, &new)),
            Some(old)
                if options.trust_version
                    && !options.full
                    && self.differ.quick_check(old, &new) == QuickCheck::UpToDate =>
            {
                let diff = ManifestDiff {
                    old_version: Some(old.version().to_string()),
                    new_version: new.version().to_string(),
                    unchanged: new.len(),
                    ..ManifestDiff::default()
                };
                (PlanStatus::UpToDate, diff)
            }
            Some(old) => {
                let diff = self.differ.diff(Some(old), &new);
                if diff.stale_version() {
                    warn!(
                        name = %options.name,
                        version = %diff.new_version,
                        "assets changed but version did not"
                    );
                }
                let status = if diff.is_empty() {
                    PlanStatus::Unchanged
                } else {
                    PlanStatus::Changed
                };
                (status, diff)
            }
        };

        let committed = options.commit && status != PlanStatus::UpToDate;
        if committed {
            self.store.save(&options.name, &new)?;
            info!(name = %options.name, version = new.version(), "stored manifest replaced");
        }

        Ok(PlanResult {
            name: options.name.clone(),
            status,
            diff,
            committed,
            warnings,
        })
    }
}
