//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod file_system;
pub mod manifest_store;

pub use file_system::{FileSystem, FsError, FsResult};
pub use manifest_store::{validate_store_name, ManifestStore, StoreError, StoreResult};
