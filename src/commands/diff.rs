use std::io;
use std::path::Path;

use anyhow::Result;
use swmanifest::presentation::factory::create_diff_use_case;
use swmanifest::presentation::json::{emit_event, ChangeEvent};

use super::CommandContext;

/// With `exit_code`, changes make the command fail (like `git diff --exit-code`)
pub fn cmd_diff(ctx: &CommandContext, old: &Path, new: &Path, exit_code: bool) -> Result<bool> {
    ctx.start("diff")?;

    let result = create_diff_use_case(&ctx.config)?.execute(old, new)?;
    ctx.warnings("diff", &result.warnings)?;
    let diff = result.diff;
    let success = !(exit_code && !diff.is_empty());

    if ctx.json {
        for change in diff.changes() {
            emit_event(&ChangeEvent::new("diff", change))?;
        }
        ctx.complete(
            "diff",
            success,
            serde_json::json!({
                "old_version": diff.old_version,
                "new_version": diff.new_version,
                "added": diff.added.len(),
                "updated": diff.updated.len(),
                "removed": diff.removed.len(),
                "unchanged": diff.unchanged,
                "stale_version": diff.stale_version(),
            }),
        )?;
    } else {
        ctx.renderer.render_diff(&mut io::stdout().lock(), &diff)?;
    }

    Ok(success)
}
