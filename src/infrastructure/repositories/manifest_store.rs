//! File Manifest Store
//!
//! Implements the ManifestStore port by keeping each stored manifest as
//! `<dir>/<name>.json` in the bare JSON format.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::Manifest;
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_store::{
    validate_store_name, ManifestStore, StoreError, StoreResult,
};
use crate::domain::services::ValidationPolicy;
use crate::infrastructure::codec::{self, ManifestFormat};
use crate::infrastructure::fs::LocalFs;

/// Default directory for stored manifests, relative to the working directory
pub const DEFAULT_STORE_DIR: &str = ".swmanifest";

/// Directory-backed manifest store
pub struct FileManifestStore<F: FileSystem = LocalFs> {
    dir: PathBuf,
    fs: F,
}

impl FileManifestStore<LocalFs> {
    /// Create a store rooted at `dir` on the local disk
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fs: LocalFs::new(),
        }
    }
}

impl<F: FileSystem> FileManifestStore<F> {
    /// Create with a custom file system (for testing)
    pub fn with_fs(dir: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the snapshot for `name`
    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        validate_store_name(name)?;
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl<F: FileSystem> ManifestStore for FileManifestStore<F> {
    fn load(&self, name: &str) -> StoreResult<Option<Manifest>> {
        let path = self.path_for(name)?;
        if !self.fs.exists(&path) {
            debug!(path = %path.display(), "no stored manifest");
            return Ok(None);
        }

        let content = self
            .fs
            .read(&path)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        let corrupt = |message: String| StoreError::Corrupt {
            name: name.to_string(),
            message,
        };
        let decoded = codec::decode(&content).map_err(|e| corrupt(e.to_string()))?;
        let (manifest, _) = Manifest::from_document(&decoded.document, &ValidationPolicy::permissive())
            .map_err(|e| corrupt(e.to_string()))?;

        debug!(path = %path.display(), version = manifest.version(), "loaded stored manifest");
        Ok(Some(manifest))
    }

    fn save(&self, name: &str, manifest: &Manifest) -> StoreResult<()> {
        let path = self.path_for(name)?;
        let content = codec::encode(manifest, ManifestFormat::Json)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        self.fs
            .write(&path, &content)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        debug!(path = %path.display(), version = manifest.version(), "stored manifest");
        Ok(())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let path = self.path_for(name)?;
        if self.fs.exists(&path) {
            self.fs
                .remove(&path)
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(())
    }
}
