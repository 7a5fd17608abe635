//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `codec/` - Manifest text formats (JSON, script)
//! - `fs/` - File system implementations
//! - `repositories/` - Stored manifest persistence

pub mod codec;
pub mod fs;
pub mod repositories;

// Re-export for convenience
pub use codec::{decode, encode, Decoded, ManifestFormat};
pub use fs::LocalFs;
pub use repositories::{FileManifestStore, DEFAULT_STORE_DIR};
