//! Validator Domain Service
//!
//! Checks the structural rules of a manifest document and collects every
//! violation into a report.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::entities::ManifestDocument;
use crate::domain::value_objects::{AssetUrl, ContentHash, HashAlgorithm, HashParseError};

/// How to treat two urls that carry the same hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateHashPolicy {
    Allow,
    #[default]
    Warn,
    Deny,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationCode {
    EmptyUrl,
    DuplicateUrl,
    InvalidUrl,
    InvalidHash,
    HashLength,
    DisallowedAlgorithm,
    MissingVersion,
    DuplicateHash,
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationCode::EmptyUrl => "empty-url",
            ViolationCode::DuplicateUrl => "duplicate-url",
            ViolationCode::InvalidUrl => "invalid-url",
            ViolationCode::InvalidHash => "invalid-hash",
            ViolationCode::HashLength => "hash-length",
            ViolationCode::DisallowedAlgorithm => "disallowed-algorithm",
            ViolationCode::MissingVersion => "missing-version",
            ViolationCode::DuplicateHash => "duplicate-hash",
        }
    }
}

/// A single broken rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub severity: Severity,
    /// Index into `assets`, if the violation concerns one entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "[{}] assets[{}]: {}", self.code.as_str(), index, self.message),
            None => write!(f, "[{}] {}", self.code.as_str(), self.message),
        }
    }
}

/// All violations found in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn codes(&self) -> Vec<ViolationCode> {
        self.violations.iter().map(|v| v.code).collect()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors().count();
        write!(f, "{} error(s)", errors)?;
        if let Some(first) = self.errors().next() {
            write!(f, ", first: {}", first)?;
        }
        Ok(())
    }
}

/// Rules the validator enforces beyond the fixed structural ones
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Empty means any algorithm is accepted
    pub allowed_algorithms: Vec<HashAlgorithm>,
    pub duplicate_hashes: DuplicateHashPolicy,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            allowed_algorithms: vec![
                HashAlgorithm::Sha256,
                HashAlgorithm::Sha384,
                HashAlgorithm::Sha512,
            ],
            duplicate_hashes: DuplicateHashPolicy::Warn,
        }
    }
}

impl ValidationPolicy {
    /// Only the fixed structural rules
    pub fn permissive() -> Self {
        Self {
            allowed_algorithms: Vec::new(),
            duplicate_hashes: DuplicateHashPolicy::Allow,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Validator {
    policy: ValidationPolicy,
}

impl Validator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(&self, document: &ManifestDocument) -> ValidationReport {
        let mut violations = Vec::new();
        let mut first_url: HashMap<&str, usize> = HashMap::new();
        let mut first_hash: HashMap<&str, usize> = HashMap::new();

        for (index, asset) in document.assets.iter().enumerate() {
            self.check_url(index, &asset.url, &mut first_url, &mut violations);
            if self.check_hash(index, &asset.hash, &mut violations) {
                self.check_duplicate_hash(index, &asset.hash, &mut first_hash, &mut violations);
            }
        }

        match document.version.as_deref() {
            Some(v) if !v.trim().is_empty() => {}
            Some(_) => violations.push(Violation {
                code: ViolationCode::MissingVersion,
                severity: Severity::Error,
                index: None,
                message: "version is empty".to_string(),
            }),
            None => violations.push(Violation {
                code: ViolationCode::MissingVersion,
                severity: Severity::Error,
                index: None,
                message: "version is missing".to_string(),
            }),
        }

        ValidationReport { violations }
    }

    fn check_url<'a>(
        &self,
        index: usize,
        url: &'a str,
        first_url: &mut HashMap<&'a str, usize>,
        violations: &mut Vec<Violation>,
    ) {
        if url.is_empty() {
            violations.push(Violation {
                code: ViolationCode::EmptyUrl,
                severity: Severity::Error,
                index: Some(index),
                message: "url is empty".to_string(),
            });
            return;
        }

        if let Err(e) = AssetUrl::parse(url) {
            violations.push(Violation {
                code: ViolationCode::InvalidUrl,
                severity: Severity::Error,
                index: Some(index),
                message: format!("'{}': {}", url, e),
            });
        }

        if let Some(first) = first_url.get(url) {
            violations.push(Violation {
                code: ViolationCode::DuplicateUrl,
                severity: Severity::Error,
                index: Some(index),
                message: format!("url '{}' already listed at assets[{}]", url, first),
            });
        } else {
            first_url.insert(url, index);
        }
    }

    /// Returns true when the hash is well-formed
    fn check_hash(&self, index: usize, hash: &str, violations: &mut Vec<Violation>) -> bool {
        let parsed = match ContentHash::parse(hash) {
            Ok(parsed) => parsed,
            Err(e @ HashParseError::WrongLength { .. }) => {
                violations.push(Violation {
                    code: ViolationCode::HashLength,
                    severity: Severity::Error,
                    index: Some(index),
                    message: e.to_string(),
                });
                return false;
            }
            Err(e) => {
                violations.push(Violation {
                    code: ViolationCode::InvalidHash,
                    severity: Severity::Error,
                    index: Some(index),
                    message: format!("'{}': {}", hash, e),
                });
                return false;
            }
        };

        let allowed = &self.policy.allowed_algorithms;
        if !allowed.is_empty() && !allowed.contains(parsed.algorithm()) {
            violations.push(Violation {
                code: ViolationCode::DisallowedAlgorithm,
                severity: Severity::Error,
                index: Some(index),
                message: format!("algorithm '{}' is not allowed", parsed.algorithm()),
            });
        }
        true
    }

    fn check_duplicate_hash<'a>(
        &self,
        index: usize,
        hash: &'a str,
        first_hash: &mut HashMap<&'a str, usize>,
        violations: &mut Vec<Violation>,
    ) {
        let severity = match self.policy.duplicate_hashes {
            DuplicateHashPolicy::Allow => return,
            DuplicateHashPolicy::Warn => Severity::Warning,
            DuplicateHashPolicy::Deny => Severity::Error,
        };

        if let Some(first) = first_hash.get(hash) {
            violations.push(Violation {
                code: ViolationCode::DuplicateHash,
                severity,
                index: Some(index),
                message: format!("same content hash as assets[{}]", first),
            });
        } else {
            first_hash.insert(hash, index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::DocumentAsset;

    const H1: &str = "sha256-lOCs45frNf+D7me6lKLgUhRCdt4VwHCp9H6Ct+YWzfs=";
    const H2: &str = "sha256-tO5O5YzMTVSaKBboxAqezOQL9ewmupzV2JrB5Rkc8a4=";

    fn doc(assets: &[(&str, &str)], version: Option<&str>) -> ManifestDocument {
        ManifestDocument {
            assets: assets
                .iter()
                .map(|(h, u)| DocumentAsset::new(*h, *u))
                .collect(),
            version: version.map(str::to_string),
        }
    }

    #[test]
    fn clean_document_has_no_violations() {
        let report = Validator::default().validate(&doc(
            &[(H1, "_framework/blazor.webassembly.js"), (H2, "_framework/icudt.dat")],
            Some("rPOVcKaq"),
        ));
        assert!(report.is_clean(), "{:?}", report);
    }

    #[test]
    fn empty_assets_are_allowed() {
        let report = Validator::default().validate(&doc(&[], Some("v1")));
        assert!(report.is_clean());
    }

    #[test]
    fn reports_empty_url() {
        let report = Validator::default().validate(&doc(&[(H1, "")], Some("v1")));
        assert_eq!(report.codes(), vec![ViolationCode::EmptyUrl]);
        assert_eq!(report.violations[0].index, Some(0));
    }

    #[test]
    fn reports_duplicate_url_at_second_occurrence() {
        let report = Validator::default().validate(&doc(
            &[(H1, "index.html"), (H2, "index.html")],
            Some("v1"),
        ));
        assert_eq!(report.codes(), vec![ViolationCode::DuplicateUrl]);
        assert_eq!(report.violations[0].index, Some(1));
        assert!(report.violations[0].message.contains("assets[0]"));
    }

    #[test]
    fn dot_segment_url_is_invalid() {
        let report = Validator::default().validate(&doc(
            &[(H1, "a.js"), (H2, "./a.js")],
            Some("v1"),
        ));
        assert_eq!(report.codes(), vec![ViolationCode::InvalidUrl]);
        assert_eq!(report.violations[0].index, Some(1));
    }

    #[test]
    fn reports_invalid_hash() {
        let report = Validator::default().validate(&doc(&[("deadbeef", "a.js")], Some("v1")));
        assert_eq!(report.codes(), vec![ViolationCode::InvalidHash]);
    }

    #[test]
    fn reports_wrong_digest_length() {
        let report = Validator::default().validate(&doc(&[("sha256-AAAA", "a.js")], Some("v1")));
        assert_eq!(report.codes(), vec![ViolationCode::HashLength]);
    }

    #[test]
    fn reports_disallowed_algorithm() {
        let policy = ValidationPolicy {
            allowed_algorithms: vec![HashAlgorithm::Sha512],
            ..ValidationPolicy::default()
        };
        let report = Validator::new(policy).validate(&doc(&[(H1, "a.js")], Some("v1")));
        assert_eq!(report.codes(), vec![ViolationCode::DisallowedAlgorithm]);
    }

    #[test]
    fn permissive_policy_accepts_unknown_algorithm() {
        let report = Validator::new(ValidationPolicy::permissive())
            .validate(&doc(&[("blake3-AAAA", "a.js")], Some("v1")));
        assert!(report.is_clean());
    }

    #[test]
    fn reports_missing_and_empty_version() {
        let missing = Validator::default().validate(&doc(&[], None));
        assert_eq!(missing.codes(), vec![ViolationCode::MissingVersion]);

        let blank = Validator::default().validate(&doc(&[], Some("  ")));
        assert_eq!(blank.codes(), vec![ViolationCode::MissingVersion]);
    }

    #[test]
    fn duplicate_hash_severity_follows_policy() {
        let d = doc(&[(H1, "a.js"), (H1, "b.js")], Some("v1"));

        let warn = Validator::default().validate(&d);
        assert_eq!(warn.codes(), vec![ViolationCode::DuplicateHash]);
        assert!(!warn.has_errors());
        assert!(warn.has_warnings());

        let deny = Validator::new(ValidationPolicy {
            duplicate_hashes: DuplicateHashPolicy::Deny,
            ..ValidationPolicy::default()
        })
        .validate(&d);
        assert!(deny.has_errors());

        let allow = Validator::new(ValidationPolicy {
            duplicate_hashes: DuplicateHashPolicy::Allow,
            ..ValidationPolicy::default()
        })
        .validate(&d);
        assert!(allow.is_clean());
    }

    #[test]
    fn collects_every_violation() {
        let report = Validator::default().validate(&doc(
            &[("bad", ""), ("sha256-AAAA", "/abs.js"), (H1, "ok.js")],
            None,
        ));
        assert_eq!(
            report.codes(),
            vec![
                ViolationCode::EmptyUrl,
                ViolationCode::InvalidHash,
                ViolationCode::InvalidUrl,
                ViolationCode::HashLength,
                ViolationCode::MissingVersion,
            ]
        );
    }

    #[test]
    fn report_display_mentions_first_error() {
        let report = Validator::default().validate(&doc(&[(H1, "")], Some("v1")));
        assert_eq!(
            report.to_string(),
            "1 error(s), first: [empty-url] assets[0]: url is empty"
        );
    }
}
