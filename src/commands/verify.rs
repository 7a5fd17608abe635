use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;
use swmanifest::application::VerifyOptions;
use swmanifest::presentation::factory::create_verify_use_case;
use swmanifest::presentation::json::{emit_event, EntryEvent, UnlistedEvent};

use super::CommandContext;

pub fn cmd_verify(
    ctx: &CommandContext,
    manifest: &Path,
    root: Option<PathBuf>,
    unlisted: bool,
) -> Result<bool> {
    ctx.start("verify")?;

    // Urls are relative to the directory the manifest is served from
    let root = root.unwrap_or_else(|| match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    });
    let options = VerifyOptions::new(root)
        .with_unlisted(unlisted)
        .with_ignore(ctx.config.verify.ignore.clone());

    let result = create_verify_use_case(&ctx.config)?.execute(manifest, &options)?;
    ctx.warnings("verify", &result.warnings)?;
    let success = result.is_success();

    if ctx.json {
        for entry in &result.entries {
            emit_event(&EntryEvent::new("verify", entry))?;
        }
        for url in &result.unlisted {
            emit_event(&UnlistedEvent::new("verify", url))?;
        }
        ctx.complete(
            "verify",
            success,
            serde_json::json!({
                "version": result.version,
                "verified": result.ok_count(),
                "total": result.entries.len(),
                "unlisted": result.unlisted.len(),
            }),
        )?;
    } else {
        ctx.renderer.render_verify(&mut io::stdout().lock(), &result)?;
    }

    Ok(success)
}
