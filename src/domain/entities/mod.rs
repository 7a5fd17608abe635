//! Domain Entities
//!
//! - `ManifestDocument` - the raw wire shape, unchecked
//! - `Manifest` - a validated, immutable snapshot of asset hashes

mod document;
mod manifest;

pub use document::{DocumentAsset, ManifestDocument};
pub use manifest::{AssetEntry, Manifest, ManifestBuilder};
