//! Shared manifest loading for all use cases

use std::path::Path;

use tracing::debug;

use crate::domain::entities::Manifest;
use crate::domain::ports::FileSystem;
use crate::domain::services::{ValidationPolicy, ValidationReport};
use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::codec::{self, ManifestFormat};

/// A manifest read from disk, with what was noticed while reading it
#[derive(Debug, Clone)]
pub struct LoadedManifest {
    pub manifest: Manifest,
    pub format: ManifestFormat,
    /// Warning-level findings (errors make loading fail)
    pub report: ValidationReport,
    pub unknown_fields: Vec<String>,
}

impl LoadedManifest {
    /// Non-fatal findings as user-facing messages, prefixed with `path`
    pub fn warnings(&self, path: &Path) -> Vec<String> {
        let warnings = self
            .report
            .warnings()
            .map(|violation| format!("{}: {}", path.display(), violation));
        let fields = self
            .unknown_fields
            .iter()
            .map(|field| format!("{}: unknown field '{}' ignored", path.display(), field));
        warnings.chain(fields).collect()
    }
}

/// Read, decode and validate a manifest file
pub fn load_manifest<F: FileSystem>(
    fs: &F,
    path: &Path,
    policy: &ValidationPolicy,
) -> ManifestResult<LoadedManifest> {
    let text = fs.read(path).map_err(ManifestError::Fs)?;
    let decoded = codec::decode(&text)?;
    let (manifest, report) = Manifest::from_document(&decoded.document, policy)?;
    debug!(
        path = %path.display(),
        version = manifest.version(),
        assets = manifest.len(),
        "loaded manifest"
    );
    Ok(LoadedManifest {
        manifest,
        format: decoded.format,
        report,
        unknown_fields: decoded.unknown_fields,
    })
}
