//! Application Layer
//!
//! Use cases that orchestrate the manifest flows.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `CheckUseCase` - Decode and validate a manifest, collecting every violation
//! - `DiffUseCase` - Add / update / remove set between two manifest files
//! - `VerifyUseCase` - Hash listed files under a root and compare
//! - `PlanUseCase` - Diff against the stored manifest, optionally replacing it
//! - `ConvertUseCase` - Re-encode (and optionally restamp) a manifest

pub mod check;
pub mod convert;
pub mod diff;
mod load;
pub mod plan;
pub mod verify;

pub use check::{CheckOptions, CheckResult, CheckUseCase};
pub use convert::{ConvertOptions, ConvertResult, ConvertUseCase};
pub use diff::{DiffResult, DiffUseCase};
pub use load::{load_manifest, LoadedManifest};
pub use plan::{PlanOptions, PlanResult, PlanStatus, PlanUseCase, DEFAULT_PLAN_NAME};
pub use verify::{
    find_unlisted, EntryStatus, EntryVerification, VerifyOptions, VerifyResult, VerifyUseCase,
};
