//! Check Use Case
//!
//! Decodes a manifest and runs every structural rule over it, reporting all
//! violations rather than stopping at the first.

use std::path::Path;

use tracing::instrument;

use crate::domain::ports::FileSystem;
use crate::domain::services::{ValidationPolicy, ValidationReport, Validator};
use crate::error::{ManifestError, ManifestResult};
use crate::infrastructure::codec::{self, ManifestFormat};

/// Options for the check operation
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckOptions {
    /// Treat warnings as errors
    pub strict: bool,
}

/// Result of the check operation
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub format: ManifestFormat,
    pub asset_count: usize,
    pub version: Option<String>,
    pub report: ValidationReport,
    pub unknown_fields: Vec<String>,
}

impl CheckResult {
    /// Check passes when there are no errors (and no warnings in strict mode)
    pub fn is_success(&self, options: CheckOptions) -> bool {
        !self.report.has_errors() && !(options.strict && self.report.has_warnings())
    }
}

/// Check Use Case
pub struct CheckUseCase<FS: FileSystem> {
    fs: FS,
    validator: Validator,
}

impl<FS: FileSystem> CheckUseCase<FS> {
    pub fn new(fs: FS, policy: ValidationPolicy) -> Self {
        Self {
            fs,
            validator: Validator::new(policy),
        }
    }

    /// Check a manifest file
    ///
    /// Unreadable or undecodable input is an `Err`; broken rules are not,
    /// they land in the report.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn execute(&self, path: &Path) -> ManifestResult<CheckResult> {
        let text = self.fs.read(path).map_err(ManifestError::Fs)?;
        self.execute_text(&text)
    }

    pub fn execute_text(&self, text: &str) -> ManifestResult<CheckResult> {
        let decoded = codec::decode(text)?;
        let report = self.validator.validate(&decoded.document);
        Ok(CheckResult {
            format: decoded.format,
            asset_count: decoded.document.assets.len(),
            version: decoded.document.version,
            report,
            unknown_fields: decoded.unknown_fields,
        })
    }
}
