//! Repository Implementations
//!
//! Concrete implementations of domain repository ports.

mod manifest_store;

pub use manifest_store::{FileManifestStore, DEFAULT_STORE_DIR};
