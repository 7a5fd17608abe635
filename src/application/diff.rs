//! Diff Use Case
//!
//! Loads two manifest files and computes the add / update / remove set
//! between them.

use std::path::Path;

use tracing::{instrument, warn};

use crate::application::load::load_manifest;
use crate::domain::ports::FileSystem;
use crate::domain::services::{Differ, ManifestDiff, ValidationPolicy};
use crate::error::ManifestResult;

/// Result of the diff operation
#[derive(Debug, Clone)]
pub struct DiffResult {
    pub diff: ManifestDiff,
    /// Non-fatal findings from loading either manifest
    pub warnings: Vec<String>,
}

/// Diff Use Case
pub struct DiffUseCase<FS: FileSystem> {
    fs: FS,
    policy: ValidationPolicy,
    differ: Differ,
}

impl<FS: FileSystem> DiffUseCase<FS> {
    pub fn new(fs: FS, policy: ValidationPolicy) -> Self {
        Self {
            fs,
            policy,
            differ: Differ::new(),
        }
    }

    #[instrument(skip(self), fields(old = %old_path.display(), new = %new_path.display()))]
    pub fn execute(&self, old_path: &Path, new_path: &Path) -> ManifestResult<DiffResult> {
        let old = load_manifest(&self.fs, old_path, &self.policy)?;
        let new = load_manifest(&self.fs, new_path, &self.policy)?;

        let mut warnings = old.warnings(old_path);
        warnings.extend(new.warnings(new_path));

        let diff = self.differ.diff(Some(&old.manifest), &new.manifest);
        if diff.stale_version() {
            warn!(
                version = %diff.new_version,
                "assets changed but version did not"
            );
        }
        Ok(DiffResult { diff, warnings })
    }
}
