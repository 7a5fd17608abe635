use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use swmanifest::application::CheckOptions;
use swmanifest::presentation::factory::create_check_use_case;
use swmanifest::presentation::json::{emit_event, ViolationEvent, WarningEvent};

use super::CommandContext;

pub fn cmd_check(ctx: &CommandContext, manifest: &Path, strict: bool) -> Result<bool> {
    ctx.start("check")?;

    let use_case = create_check_use_case(&ctx.config)?;
    let options = CheckOptions { strict };
    let result = use_case
        .execute(manifest)
        .with_context(|| format!("failed to check {}", manifest.display()))?;
    let success = result.is_success(options);

    if ctx.json {
        for violation in &result.report.violations {
            emit_event(&ViolationEvent::new("check", violation))?;
        }
        for field in &result.unknown_fields {
            emit_event(&WarningEvent::new(
                "check",
                format!("unknown field '{}' ignored", field),
            ))?;
        }
        ctx.complete(
            "check",
            success,
            serde_json::json!({
                "format": result.format.as_str(),
                "assets": result.asset_count,
                "version": result.version,
                "errors": result.report.errors().count(),
                "warnings": result.report.warnings().count(),
            }),
        )?;
    } else {
        ctx.renderer
            .render_check(&mut io::stdout().lock(), manifest, &result, options)?;
    }

    Ok(success)
}
