//! Asset URL Value Object
//!
//! A relative, forward-slash path that doubles as the cache key for one asset.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Why a url is not usable as a relative cache key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlParseError {
    #[error("url is empty")]
    Empty,
    #[error("url must be relative, found leading '/'")]
    Absolute,
    #[error("url must not carry a scheme")]
    HasScheme,
    #[error("url must not contain a '..' segment")]
    ParentSegment,
    #[error("url must not contain '.' or empty segments")]
    NonCanonicalSegment,
    #[error("url must use '/' separators, found '\\'")]
    Backslash,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetUrl(String);

impl AssetUrl {
    pub fn parse(s: &str) -> Result<Self, UrlParseError> {
        if s.is_empty() {
            return Err(UrlParseError::Empty);
        }
        if s.starts_with('/') {
            return Err(UrlParseError::Absolute);
        }
        if s.contains("://") {
            return Err(UrlParseError::HasScheme);
        }
        if s.contains('\\') {
            return Err(UrlParseError::Backslash);
        }
        if s.split('/').any(|segment| segment == "..") {
            return Err(UrlParseError::ParentSegment);
        }
        // `./a.js` and `a//b.js` would name the same file as another url
        if s.split('/').any(|segment| segment.is_empty() || segment == ".") {
            return Err(UrlParseError::NonCanonicalSegment);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the url onto a file below `root`
    pub fn to_path(&self, root: &Path) -> PathBuf {
        self.0
            .split('/')
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }

    /// Build a url from a path relative to `root` (forward slashes)
    pub fn from_relative_path(path: &Path) -> Result<Self, UrlParseError> {
        let joined = path
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        Self::parse(&joined)
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for AssetUrl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for AssetUrl {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
