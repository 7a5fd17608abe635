//! Domain Layer
//!
//! Pure manifest logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Manifest and its raw document form
//! - `value_objects/` - Immutable value types (ContentHash, AssetUrl)
//! - `services/` - Validator, Differ, version derivation
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
