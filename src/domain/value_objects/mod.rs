//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod asset_url;
mod hash;

pub use asset_url::{AssetUrl, UrlParseError};
pub use hash::{ContentHash, HashAlgorithm, HashParseError};
