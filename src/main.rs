//! swmanifest CLI - validate, diff and verify service-worker asset manifests
//!
//! Usage: swmanifest <COMMAND>
//!
//! Commands:
//!   check    Validate a manifest
//!   diff     Assets added, updated and removed between two manifests
//!   verify   Hash listed files and compare with the manifest
//!   plan     Diff against the stored manifest
//!   convert  Re-encode a manifest as JSON or script

mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use swmanifest::config::{self, ConfigWarning};
use swmanifest::presentation::json::{emit_event, ErrorEvent, WarningEvent};
use swmanifest::presentation::{Cli, Commands};
use swmanifest::telemetry;

use commands::CommandContext;

/// Exit code when a check ran and failed
const EXIT_FAILED: u8 = 1;
/// Exit code for usage, config and I/O errors
const EXIT_ERROR: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let command = cli.command.name();
    let json = cli.json;
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_FAILED),
        Err(err) => {
            if json {
                let _ = emit_event(&ErrorEvent::new(command, format!("{:#}", err)));
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let loaded = config::load(cli.config.as_deref(), &cwd)?;
    for warning in &loaded.warnings {
        report_config_warning(cli.command.name(), warning, cli.json);
    }

    let ctx = CommandContext::new(loaded.config, cli.json, cli.verbose);
    match cli.command {
        Commands::Check { manifest, strict } => commands::cmd_check(&ctx, &manifest, strict),
        Commands::Diff {
            old,
            new,
            exit_code,
        } => commands::cmd_diff(&ctx, &old, &new, exit_code),
        Commands::Verify {
            manifest,
            root,
            unlisted,
        } => commands::cmd_verify(&ctx, &manifest, root, unlisted),
        Commands::Plan {
            manifest,
            name,
            commit,
            full,
        } => commands::cmd_plan(&ctx, &manifest, &name, commit, full),
        Commands::Convert {
            manifest,
            to,
            restamp,
            output,
        } => commands::cmd_convert(&ctx, &manifest, to, restamp, output),
    }
}

fn report_config_warning(command: &str, warning: &ConfigWarning, json: bool) {
    let mut message = format!("unknown config key '{}' in {}", warning.key, warning.file.display());
    if let Some(line) = warning.line {
        message.push_str(&format!(":{}", line));
    }
    if let Some(suggestion) = &warning.suggestion {
        message.push_str(&format!(" (did you mean '{}'?)", suggestion));
    }

    if json {
        let _ = emit_event(&WarningEvent::new(command, message));
    } else {
        eprintln!("Warning: {}", message);
    }
}
