//! Configuration module for swmanifest
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SWMANIFEST_*)
//! 3. `--config PATH` or project config (./swmanifest.toml)
//! 4. User config (~/.config/swmanifest/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{
    load, user_config_path, with_env_overrides, ConfigWarning, LoadedConfig, PROJECT_CONFIG_FILE,
};
pub use types::{CheckConfig, Config, OutputConfig, StoreConfig, VerifyConfig};
