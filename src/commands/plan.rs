use std::io;
use std::path::Path;

use anyhow::Result;
use swmanifest::application::PlanOptions;
use swmanifest::presentation::factory::create_plan_use_case;
use swmanifest::presentation::json::{emit_event, ChangeEvent};

use super::CommandContext;

pub fn cmd_plan(
    ctx: &CommandContext,
    manifest: &Path,
    name: &str,
    commit: bool,
    full: bool,
) -> Result<bool> {
    ctx.start("plan")?;

    let options = PlanOptions::new(name)
        .with_commit(commit)
        .with_full(full)
        .with_trust_version(ctx.config.store.trust_version);
    let result = create_plan_use_case(&ctx.config)?.execute(manifest, &options)?;
    ctx.warnings("plan", &result.warnings)?;

    if ctx.json {
        for change in result.diff.changes() {
            emit_event(&ChangeEvent::new("plan", change))?;
        }
        ctx.complete(
            "plan",
            true,
            serde_json::json!({
                "name": result.name,
                "status": result.status,
                "old_version": result.diff.old_version,
                "new_version": result.diff.new_version,
                "fetch": result.diff.to_fetch().count(),
                "evict": result.diff.to_evict().count(),
                "stale_version": result.diff.stale_version(),
                "committed": result.committed,
            }),
        )?;
    } else {
        ctx.renderer.render_plan(&mut io::stdout().lock(), &result)?;
    }

    Ok(true)
}
