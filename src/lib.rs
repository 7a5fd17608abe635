//! swmanifest - service-worker asset manifest toolkit
//!
//! A publish step writes a manifest listing every static asset of a web
//! app with the SRI-style hash of its content, plus a build version. This
//! crate reads those manifests in either shape (bare JSON or the
//! `self.assetsManifest = {...};` script), validates them, and computes what
//! a cache has to fetch and evict when a new build is published.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;
pub mod telemetry;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{AssetEntry, Manifest, ManifestBuilder, ManifestDocument};
pub use domain::services::{
    derive_version, Differ, ManifestDiff, ValidationPolicy, ValidationReport, Validator,
};
pub use domain::value_objects::{AssetUrl, ContentHash, HashAlgorithm};
pub use error::{ManifestError, ManifestResult};
pub use infrastructure::{decode, encode, ManifestFormat};
