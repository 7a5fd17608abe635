//! Common test utilities for swmanifest CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated test environment with a temp working directory
//! - Fixtures: sample sites and manifest builders

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
