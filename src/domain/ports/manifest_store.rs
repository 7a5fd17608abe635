//! ManifestStore port - persistence for the last accepted manifest
//!
//! A consumer diffs each freshly published manifest against the one it
//! accepted last time. This trait hides where that previous snapshot lives.

use crate::domain::entities::Manifest;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Store name contains characters unsafe for a file name
    #[error("invalid store name '{0}'")]
    InvalidName(String),
    /// Stored snapshot exists but can't be decoded
    #[error("stored manifest '{name}' is corrupt: {message}")]
    Corrupt { name: String, message: String },
    /// I/O error
    #[error("store I/O error: {0}")]
    Io(String),
}

/// Abstract repository for stored manifests, keyed by name
pub trait ManifestStore {
    /// Load a stored manifest; `Ok(None)` when nothing was stored yet
    fn load(&self, name: &str) -> StoreResult<Option<Manifest>>;

    /// Replace the stored manifest wholesale
    fn save(&self, name: &str, manifest: &Manifest) -> StoreResult<()>;

    /// Forget a stored manifest (no-op if absent)
    fn delete(&self, name: &str) -> StoreResult<()>;
}

/// Check that a store name is usable as a file stem
pub fn validate_store_name(name: &str) -> StoreResult<()> {
    let ok = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && !name.starts_with('.');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidName(name.to_string()))
    }
}
