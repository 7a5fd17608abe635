//! Content Hash Value Object
//!
//! A validated, immutable digest of a file's bytes in Subresource Integrity
//! form: `<algorithm>-<base64 payload>`, e.g. `sha256-lOCs45fr...=`.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Digest algorithm named by a hash prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
    /// Structurally valid but not computable here
    Other(String),
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &str {
        match self {
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
            HashAlgorithm::Other(name) => name,
        }
    }

    /// Raw digest length in bytes, if the algorithm is known
    pub fn digest_len(&self) -> Option<usize> {
        match self {
            HashAlgorithm::Sha256 => Some(32),
            HashAlgorithm::Sha384 => Some(48),
            HashAlgorithm::Sha512 => Some(64),
            HashAlgorithm::Other(_) => None,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, HashAlgorithm::Other(_))
    }

    fn from_name(name: &str) -> Self {
        match name {
            "sha256" => HashAlgorithm::Sha256,
            "sha384" => HashAlgorithm::Sha384,
            "sha512" => HashAlgorithm::Sha512,
            other => HashAlgorithm::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_algorithm_name(s) {
            Ok(Self::from_name(s))
        } else {
            Err(HashParseError::InvalidAlgorithm(s.to_string()))
        }
    }
}

/// Why a string is not a well-formed content hash
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("missing '-' between algorithm and payload")]
    MissingSeparator,
    #[error("invalid algorithm name '{0}'")]
    InvalidAlgorithm(String),
    #[error("empty digest payload")]
    EmptyPayload,
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("{algorithm} digest must be {expected} bytes, got {actual}")]
    WrongLength {
        algorithm: String,
        expected: usize,
        actual: usize,
    },
}

/// Content hash value object
///
/// Equality is exact string equality; consumers never need to decode the
/// payload to compare two hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash {
    raw: String,
    algorithm: HashAlgorithm,
}

impl ContentHash {
    /// Separator between algorithm and payload
    pub const SEPARATOR: char = '-';

    /// Parse and validate a hash string
    pub fn parse(s: &str) -> Result<Self, HashParseError> {
        let (name, payload) = s
            .split_once(Self::SEPARATOR)
            .ok_or(HashParseError::MissingSeparator)?;
        let algorithm: HashAlgorithm = name.parse()?;
        if payload.is_empty() {
            return Err(HashParseError::EmptyPayload);
        }
        let decoded = STANDARD
            .decode(payload)
            .map_err(|e| HashParseError::InvalidBase64(e.to_string()))?;
        if let Some(expected) = algorithm.digest_len() {
            if decoded.len() != expected {
                return Err(HashParseError::WrongLength {
                    algorithm: algorithm.to_string(),
                    expected,
                    actual: decoded.len(),
                });
            }
        }
        Ok(Self {
            raw: s.to_string(),
            algorithm,
        })
    }

    /// Build a hash from a raw digest
    pub fn from_digest(algorithm: HashAlgorithm, digest: &[u8]) -> Self {
        Self {
            raw: format!(
                "{}{}{}",
                algorithm.as_str(),
                Self::SEPARATOR,
                STANDARD.encode(digest)
            ),
            algorithm,
        }
    }

    /// Compute the hash of in-memory content
    pub fn compute(algorithm: &HashAlgorithm, content: &[u8]) -> Option<Self> {
        Self::compute_reader(algorithm, content).ok().flatten()
    }

    /// Compute the hash of a byte stream, reading it in chunks
    ///
    /// Returns `Ok(None)` when the algorithm cannot be computed locally.
    pub fn compute_reader<R: Read>(
        algorithm: &HashAlgorithm,
        reader: R,
    ) -> std::io::Result<Option<Self>> {
        let digest = match algorithm {
            HashAlgorithm::Sha256 => digest_reader::<Sha256, _>(reader)?,
            HashAlgorithm::Sha384 => digest_reader::<Sha384, _>(reader)?,
            HashAlgorithm::Sha512 => digest_reader::<Sha512, _>(reader)?,
            HashAlgorithm::Other(_) => return Ok(None),
        };
        Ok(Some(Self::from_digest(algorithm.clone(), &digest)))
    }

    /// Get the full hash string with prefix
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn algorithm(&self) -> &HashAlgorithm {
        &self.algorithm
    }

    /// Get just the base64 payload without the algorithm prefix
    pub fn payload(&self) -> &str {
        &self.raw[self.algorithm.as_str().len() + 1..]
    }

    /// Check if this hash matches another
    pub fn matches(&self, other: &ContentHash) -> bool {
        self.raw == other.raw
    }
}

fn digest_reader<D: Digest, R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_vec())
}

fn is_algorithm_name(s: &str) -> bool {
    !s.is_empty()
        && s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for ContentHash {
    type Err = HashParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ContentHash {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for ContentHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for ContentHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
