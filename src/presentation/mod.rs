//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text and NDJSON)
//!
//! ## Structure
//!
//! - `cli` - Argument definitions
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Human-readable rendering
//! - `json` - NDJSON event types for `--json`

pub mod cli;
pub mod factory;
pub mod json;
pub mod output;

pub use cli::{Cli, Commands};
pub use output::TextRenderer;
