//! Manifest entity - an immutable snapshot of published asset hashes
//!
//! A manifest is created wholesale at publish time and replaced wholesale by
//! the next build. It's a pure data structure; reading and writing it is
//! handled by the codec and the `ManifestStore` port.

use crate::domain::entities::{DocumentAsset, ManifestDocument};
use crate::domain::services::{derive_version, ValidationPolicy, ValidationReport, Validator};
use crate::domain::value_objects::{AssetUrl, ContentHash};
use crate::error::{ManifestError, ManifestResult};

/// Expected content digest for one static file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetEntry {
    hash: ContentHash,
    url: AssetUrl,
}

impl AssetEntry {
    pub fn new(hash: ContentHash, url: AssetUrl) -> Self {
        Self { hash, url }
    }

    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    pub fn url(&self) -> &AssetUrl {
        &self.url
    }
}

/// Ordered list of asset entries plus the build version
///
/// Urls are unique and the version is non-empty; both are enforced at
/// construction and there are no mutators afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    assets: Vec<AssetEntry>,
    version: String,
}

impl Manifest {
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::default()
    }

    /// Validate a raw document and convert it into a manifest
    ///
    /// On success the report still carries any warning-level findings.
    pub fn from_document(
        document: &ManifestDocument,
        policy: &ValidationPolicy,
    ) -> ManifestResult<(Self, ValidationReport)> {
        let report = Validator::new(policy.clone()).validate(document);
        if report.has_errors() {
            return Err(ManifestError::Invalid(report));
        }

        let mut assets = Vec::with_capacity(document.assets.len());
        for asset in &document.assets {
            let entry = match (ContentHash::parse(&asset.hash), AssetUrl::parse(&asset.url)) {
                (Ok(hash), Ok(url)) => AssetEntry::new(hash, url),
                _ => return Err(ManifestError::Invalid(report)),
            };
            assets.push(entry);
        }

        let version = match &document.version {
            Some(version) => version.clone(),
            None => return Err(ManifestError::Invalid(report)),
        };

        Ok((Self { assets, version }, report))
    }

    /// Convert back to the raw wire shape
    pub fn to_document(&self) -> ManifestDocument {
        ManifestDocument {
            assets: self
                .assets
                .iter()
                .map(|e| DocumentAsset::new(e.hash.as_str(), e.url.as_str()))
                .collect(),
            version: Some(self.version.clone()),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn assets(&self) -> &[AssetEntry] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Look up an entry by url
    pub fn get(&self, url: &str) -> Option<&AssetEntry> {
        self.assets.iter().find(|e| e.url.as_str() == url)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.get(url).is_some()
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|e| e.url.as_str())
    }

    /// A copy of this manifest with the version recomputed from its entries
    pub fn restamped(&self) -> Self {
        Self {
            assets: self.assets.clone(),
            version: derive_version(&self.assets),
        }
    }
}

impl TryFrom<ManifestDocument> for Manifest {
    type Error = ManifestError;

    fn try_from(document: ManifestDocument) -> Result<Self, Self::Error> {
        Self::from_document(&document, &ValidationPolicy::default()).map(|(m, _)| m)
    }
}

/// Builder for manifests assembled in code
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    assets: Vec<AssetEntry>,
    version: Option<String>,
}

impl ManifestBuilder {
    pub fn asset(mut self, hash: ContentHash, url: AssetUrl) -> Self {
        self.assets.push(AssetEntry::new(hash, url));
        self
    }

    pub fn entry(mut self, entry: AssetEntry) -> Self {
        self.assets.push(entry);
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Finish with the explicitly supplied version
    pub fn build(self) -> ManifestResult<Manifest> {
        let version = self.version.clone().unwrap_or_default();
        self.finish(version)
    }

    /// Finish with a version derived from the entries
    pub fn build_with_derived_version(self) -> ManifestResult<Manifest> {
        let version = derive_version(&self.assets);
        self.finish(version)
    }

    /// Entries are already typed, so only the cross-entry and version rules can fail
    fn finish(self, version: String) -> ManifestResult<Manifest> {
        let document = ManifestDocument {
            assets: self
                .assets
                .iter()
                .map(|e| DocumentAsset::new(e.hash.as_str(), e.url.as_str()))
                .collect(),
            version: Some(version.clone()),
        };
        let report = Validator::new(ValidationPolicy::permissive()).validate(&document);
        if report.has_errors() {
            return Err(ManifestError::Invalid(report));
        }

        Ok(Manifest {
            assets: self.assets,
            version,
        })
    }
}
