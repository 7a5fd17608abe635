use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use swmanifest::application::ConvertOptions;
use swmanifest::presentation::factory::create_convert_use_case;
use swmanifest::ManifestFormat;

use super::CommandContext;

pub fn cmd_convert(
    ctx: &CommandContext,
    manifest: &Path,
    to: Option<ManifestFormat>,
    restamp: bool,
    output: Option<PathBuf>,
) -> Result<bool> {
    ctx.start("convert")?;

    let options = ConvertOptions::new()
        .with_to(to)
        .with_default_format(ctx.config.output.format)
        .with_restamp(restamp)
        .with_output(output);
    let result = create_convert_use_case(&ctx.config)?.execute(manifest, &options)?;
    ctx.warnings("convert", &result.warnings)?;

    if ctx.json {
        // Without a file, the encoded manifest rides along in the event
        let content = result.written_to.is_none().then_some(&result.content);
        ctx.complete(
            "convert",
            true,
            serde_json::json!({
                "from": result.from.as_str(),
                "to": result.to.as_str(),
                "version": result.version,
                "previous_version": result.previous_version,
                "output": result.written_to.as_ref().map(|p| p.display().to_string()),
                "content": content,
            }),
        )?;
    } else if result.written_to.is_some() {
        ctx.renderer.render_convert(&mut io::stdout().lock(), &result)?;
    } else {
        let mut out = io::stdout().lock();
        out.write_all(result.content.as_bytes())?;
        out.flush()?;
    }

    Ok(true)
}
