//! Build version derivation
//!
//! A short identifier that changes whenever any entry's url or hash changes,
//! so a consumer can detect "nothing changed" without hashing every asset.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::domain::entities::AssetEntry;

/// Length of a derived version string
pub const VERSION_LEN: usize = 8;

/// Derive a version from entries, in order
pub fn derive_version(entries: &[AssetEntry]) -> String {
    let mut hasher = Sha256::new();
    for entry in entries {
        hasher.update(entry.url().as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(entry.hash().as_str().as_bytes());
        hasher.update(b"\n");
    }
    let encoded = STANDARD.encode(hasher.finalize());
    encoded[..VERSION_LEN].to_string()
}
