//! Raw manifest document
//!
//! The wire shape exactly as written by the publish step, before any rule is
//! checked. Field values are kept as plain strings so that the validator can
//! report every problem instead of failing on the first one.

use serde::{Deserialize, Serialize};

/// One `{ "hash": ..., "url": ... }` object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DocumentAsset {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub url: String,
}

impl DocumentAsset {
    pub fn new(hash: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            url: url.into(),
        }
    }
}

/// Top-level `{ "assets": [...], "version": ... }` object
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestDocument {
    #[serde(default)]
    pub assets: Vec<DocumentAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
