//! Convert Use Case
//!
//! Re-encodes a manifest in another format, optionally recomputing its
//! version from the entries.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::application::load::load_manifest;
use crate::domain::ports::FileSystem;
use crate::domain::services::ValidationPolicy;
use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::codec::{self, ManifestFormat};

/// Options for the convert operation
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Target format; falls back to the output extension, then `default_format`
    pub to: Option<ManifestFormat>,
    pub default_format: ManifestFormat,
    /// Replace the version with one derived from the entries
    pub restamp: bool,
    /// Write here instead of returning the text only
    pub output: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_to(mut self, to: Option<ManifestFormat>) -> Self {
        self.to = to;
        self
    }

    pub fn with_default_format(mut self, format: ManifestFormat) -> Self {
        self.default_format = format;
        self
    }

    pub fn with_restamp(mut self, restamp: bool) -> Self {
        self.restamp = restamp;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    /// Format the output will be written in
    pub fn target_format(&self) -> ManifestFormat {
        self.to
            .or_else(|| self.output.as_deref().and_then(ManifestFormat::from_extension))
            .unwrap_or(self.default_format)
    }
}

/// Result of the convert operation
#[derive(Debug, Clone)]
pub struct ConvertResult {
    pub content: String,
    pub from: ManifestFormat,
    pub to: ManifestFormat,
    pub version: String,
    /// Set when the version was recomputed and differs from the input
    pub previous_version: Option<String>,
    pub written_to: Option<PathBuf>,
    /// Non-fatal findings from loading the manifest
    pub warnings: Vec<String>,
}

/// Convert Use Case
pub struct ConvertUseCase<FS: FileSystem> {
    fs: FS,
    policy: ValidationPolicy,
}

impl<FS: FileSystem> ConvertUseCase<FS> {
    pub fn new(fs: FS, policy: ValidationPolicy) -> Self {
        Self { fs, policy }
    }

    #[instrument(skip(self, options), fields(manifest = %manifest.display()))]
    pub fn execute(&self, manifest: &Path, options: &ConvertOptions) -> ManifestResult<ConvertResult> {
        let loaded = load_manifest(&self.fs, manifest, &self.policy)?;
        let warnings = loaded.warnings(manifest);

        let mut previous_version = None;
        let manifest = if options.restamp {
            let restamped = loaded.manifest.restamped();
            if restamped.version() != loaded.manifest.version() {
                previous_version = Some(loaded.manifest.version().to_string());
            }
            restamped
        } else {
            loaded.manifest
        };

        let to = options.target_format();
        let content = codec::encode(&manifest, to)?;

        if let Some(output) = &options.output {
            self.fs.write(output, &content).map_err(ManifestError::Fs)?;
            info!(path = %output.display(), format = to.as_str(), "wrote manifest");
        }

        Ok(ConvertResult {
            content,
            from: loaded.format,
            to,
            version: manifest.version().to_string(),
            previous_version,
            written_to: options.output.clone(),
            warnings,
        })
    }
}
