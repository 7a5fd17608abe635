//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --config) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infrastructure::ManifestFormat;

/// swmanifest - validate, diff and verify service-worker asset manifests
#[derive(Parser, Debug)]
#[command(name = "swmanifest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ./swmanifest.toml, then the user config)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a manifest (exits 1 on errors)
    Check {
        /// Manifest file (.js or .json)
        manifest: PathBuf,

        /// Fail on warnings too (CI mode)
        #[arg(long)]
        strict: bool,
    },

    /// Show assets added, updated and removed between two manifests
    Diff {
        /// Previous manifest
        old: PathBuf,

        /// New manifest
        new: PathBuf,

        /// Exit 1 when there are changes
        #[arg(long)]
        exit_code: bool,
    },

    /// Hash listed files and compare with the manifest
    Verify {
        /// Manifest file (.js or .json)
        manifest: PathBuf,

        /// Directory the asset urls are relative to (default: manifest's directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Also report files on disk the manifest does not list
        #[arg(long)]
        unlisted: bool,
    },

    /// Diff against the stored manifest and optionally replace it
    Plan {
        /// Freshly published manifest
        manifest: PathBuf,

        /// Stored manifest name
        #[arg(long, default_value = crate::application::DEFAULT_PLAN_NAME)]
        name: String,

        /// Save the new manifest as the stored one
        #[arg(long)]
        commit: bool,

        /// Run the full diff even when versions match
        #[arg(long)]
        full: bool,
    },

    /// Re-encode a manifest as JSON or script
    Convert {
        /// Manifest file (.js or .json)
        manifest: PathBuf,

        /// Target format (default: from --output extension, then config)
        #[arg(long, value_enum)]
        to: Option<ManifestFormat>,

        /// Recompute the version from the entries
        #[arg(long)]
        restamp: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Check { .. } => "check",
            Commands::Diff { .. } => "diff",
            Commands::Verify { .. } => "verify",
            Commands::Plan { .. } => "plan",
            Commands::Convert { .. } => "convert",
        }
    }
}
