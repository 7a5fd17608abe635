//! Manifest Codec
//!
//! Reads and writes manifests in the two shapes the publish step knows:
//!
//! - `Json`: the bare `{ "assets": [...], "version": "..." }` object
//! - `Script`: the same object assigned to a global, as served to the
//!   service worker (`self.assetsManifest = {...};`)

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::entities::{Manifest, ManifestDocument};
use crate::error::{ManifestError, ManifestResult};

/// Global the publish step assigns the manifest to
pub const SCRIPT_BINDING: &str = "self.assetsManifest";

/// On-disk manifest shape
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ManifestFormat {
    /// Bare JSON object
    Json,
    /// JSON object assigned to `self.assetsManifest`
    #[default]
    Script,
}

impl ManifestFormat {
    /// Guess the format from content
    pub fn detect(text: &str) -> Self {
        if strip_bom(text).trim_start().starts_with('{') {
            ManifestFormat::Json
        } else {
            ManifestFormat::Script
        }
    }

    /// Guess the format from a file extension (`.json` / `.js`)
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ManifestFormat::Json),
            "js" | "mjs" => Some(ManifestFormat::Script),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestFormat::Json => "json",
            ManifestFormat::Script => "script",
        }
    }
}

/// A decoded document plus what the decoder noticed along the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub document: ManifestDocument,
    pub format: ManifestFormat,
    /// Paths of fields the document carries but the decoder ignored
    pub unknown_fields: Vec<String>,
}

/// Decode manifest text in either format
pub fn decode(text: &str) -> ManifestResult<Decoded> {
    let text = strip_bom(text);
    let format = ManifestFormat::detect(text);
    let (json, offset) = match format {
        ManifestFormat::Json => (text, Offset::default()),
        ManifestFormat::Script => unwrap_script(text)?,
    };

    let mut unknown_fields = Vec::new();
    let mut de = serde_json::Deserializer::from_str(json);
    let document: ManifestDocument = serde_ignored::deserialize(&mut de, |path| {
        unknown_fields.push(path.to_string());
    })
    .map_err(|e| json_error(e, offset))?;
    de.end().map_err(|e| json_error(e, offset))?;

    for field in &unknown_fields {
        warn!(field = %field, "ignoring unknown manifest field");
    }
    debug!(
        format = format.as_str(),
        assets = document.assets.len(),
        "decoded manifest"
    );

    Ok(Decoded {
        document,
        format,
        unknown_fields,
    })
}

/// Encode a validated manifest
pub fn encode(manifest: &Manifest, format: ManifestFormat) -> ManifestResult<String> {
    encode_document(&manifest.to_document(), format)
}

/// Encode a raw document
///
/// Pretty JSON with two-space indent; the script form escapes `/` as `\/`
/// the way the publish step does.
pub fn encode_document(document: &ManifestDocument, format: ManifestFormat) -> ManifestResult<String> {
    let json = serde_json::to_string_pretty(document)?;
    Ok(match format {
        ManifestFormat::Json => format!("{}\n", json),
        // '/' only ever appears inside JSON strings
        ManifestFormat::Script => format!("{} = {};\n", SCRIPT_BINDING, json.replace('/', "\\/")),
    })
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Where the JSON slice of a script starts within the file
#[derive(Debug, Clone, Copy, Default)]
struct Offset {
    /// Lines before the JSON slice
    lines: usize,
    /// Columns before the JSON slice on its first line
    columns: usize,
}

/// Split `<binding> = <json>;` into the JSON slice and its offset in `text`
fn unwrap_script(text: &str) -> ManifestResult<(&str, Offset)> {
    let eq = text.find('=').ok_or_else(|| script_error("missing '=' assignment"))?;
    // Anything on earlier lines (comments, directives) is not part of the binding
    let lhs = text[..eq].rsplit('\n').next().unwrap_or_default().trim();
    let binding = ["var ", "let ", "const "]
        .iter()
        .find_map(|kw| lhs.strip_prefix(kw))
        .unwrap_or(lhs)
        .trim();
    if !is_binding(binding) {
        return Err(script_error(&format!(
            "expected '{} = {{...}}', found '{}'",
            SCRIPT_BINDING, lhs
        )));
    }

    let rest = &text[eq + 1..];
    let body = rest.trim_end();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();
    let leading = body.len() - body.trim_start().len();
    let json_start = eq + 1 + leading;
    let json = &text[json_start..json_start + body.trim_start().len()];
    let before = &text[..json_start];
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let offset = Offset {
        lines: before.matches('\n').count(),
        columns: json_start - line_start,
    };
    Ok((json, offset))
}

fn is_binding(s: &str) -> bool {
    !s.is_empty()
        && s.split('.').all(|part| {
            let mut chars = part.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        })
}

fn script_error(message: &str) -> ManifestError {
    ManifestError::Parse {
        message: message.to_string(),
        line: None,
        column: None,
    }
}

fn json_error(err: serde_json::Error, offset: Offset) -> ManifestError {
    match ManifestError::from(err) {
        ManifestError::Parse {
            message,
            line,
            column,
        } => ManifestError::Parse {
            message,
            line: line.map(|l| l + offset.lines),
            // Only the first JSON line shares the file line with the binding
            column: match line {
                Some(1) => column.map(|c| c + offset.columns),
                _ => column,
            },
        },
        other => other,
    }
}
