//! Domain Services
//!
//! Pure business logic services that operate on domain entities.
//! These services have no I/O dependencies and are easily testable.

mod differ;
mod validator;
mod version;

pub use differ::{AssetChange, ChangeKind, Differ, ManifestDiff, QuickCheck};
pub use validator::{
    DuplicateHashPolicy, Severity, ValidationPolicy, ValidationReport, Validator, Violation,
    ViolationCode,
};
pub use version::{derive_version, VERSION_LEN};
