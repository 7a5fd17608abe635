//! Command handlers
//!
//! Each handler runs one use case and renders its result. `Ok(false)` means
//! the command ran but the check it performs failed (exit code 1).

mod check;
mod convert;
mod diff;
mod plan;
mod verify;

use std::io;

use anyhow::Result;
use is_terminal::IsTerminal;
use swmanifest::presentation::json::{emit_event, CompleteEvent, StartEvent, WarningEvent};
use swmanifest::presentation::TextRenderer;
use swmanifest::Config;

pub use check::cmd_check;
pub use convert::cmd_convert;
pub use diff::cmd_diff;
pub use plan::cmd_plan;
pub use verify::cmd_verify;

/// What every handler needs besides its own arguments
pub struct CommandContext {
    pub config: Config,
    pub json: bool,
    pub renderer: TextRenderer,
}

impl CommandContext {
    pub fn new(config: Config, json: bool, verbose: u8) -> Self {
        Self {
            config,
            json,
            renderer: TextRenderer::new(io::stdout().is_terminal(), verbose),
        }
    }

    pub fn start(&self, command: &str) -> Result<()> {
        if self.json {
            emit_event(&StartEvent::new(command))?;
        }
        Ok(())
    }

    /// Non-fatal findings: `warning` events, or `Warning:` lines on stderr
    pub fn warnings(&self, command: &str, warnings: &[String]) -> Result<()> {
        for warning in warnings {
            if self.json {
                emit_event(&WarningEvent::new(command, warning.as_str()))?;
            } else {
                eprintln!("Warning: {}", warning);
            }
        }
        Ok(())
    }

    pub fn complete(&self, command: &str, success: bool, summary: serde_json::Value) -> Result<()> {
        if self.json {
            emit_event(&CompleteEvent::new(command, success).with_summary(summary))?;
        }
        Ok(())
    }
}
