//! Output Rendering
//!
//! Human-readable text for each command. Everything writes to a caller
//! supplied writer so the binary can target stdout and tests a buffer.

use std::io::{self, Write};
use std::path::Path;

use crate::application::{
    CheckOptions, CheckResult, ConvertResult, EntryStatus, PlanResult, PlanStatus, VerifyResult,
};
use crate::domain::services::{ManifestDiff, Severity};

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warn: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warn: "!",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warn: "[!]",
            arrow: "->",
        }
    }
}

/// Text renderer for command results
pub struct TextRenderer {
    /// Whether to use unicode icons
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    pub fn new(unicode: bool, verbose: u8) -> Self {
        Self { unicode, verbose }
    }

    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    pub fn render_check(
        &self,
        out: &mut impl Write,
        path: &Path,
        result: &CheckResult,
        options: CheckOptions,
    ) -> io::Result<()> {
        let icons = self.icons();
        let errors = result.report.errors().count();
        let warnings = result.report.warnings().count();

        if result.is_success(options) {
            writeln!(out, "{} {} is valid", icons.check, path.display())?;
        } else {
            writeln!(out, "{} {} is invalid", icons.cross, path.display())?;
        }
        writeln!(
            out,
            "  {} assets, version {}, {} format",
            result.asset_count,
            result.version.as_deref().unwrap_or("(none)"),
            result.format.as_str()
        )?;

        for violation in &result.report.violations {
            let icon = match violation.severity {
                Severity::Error => icons.cross,
                Severity::Warning => icons.warn,
            };
            writeln!(out, "  {} {}", icon, violation)?;
        }
        for field in &result.unknown_fields {
            writeln!(out, "  {} unknown field '{}' ignored", icons.warn, field)?;
        }

        if errors + warnings > 0 {
            writeln!(out)?;
            writeln!(out, "  {} error(s), {} warning(s)", errors, warnings)?;
        }
        Ok(())
    }

    pub fn render_diff(&self, out: &mut impl Write, diff: &ManifestDiff) -> io::Result<()> {
        let icons = self.icons();
        writeln!(
            out,
            "Version: {} {} {}",
            diff.old_version.as_deref().unwrap_or("(none)"),
            icons.arrow,
            diff.new_version
        )?;

        for change in diff.changes() {
            writeln!(out, "  {} {}", change.kind.symbol(), change.url)?;
            if self.verbose > 0 {
                if let Some(old) = &change.old_hash {
                    writeln!(out, "      old {}", old)?;
                }
                if let Some(new) = &change.new_hash {
                    writeln!(out, "      new {}", new)?;
                }
            }
        }

        if diff.is_empty() {
            writeln!(out, "  No asset changes")?;
        }
        writeln!(out, "Summary: {}", diff.summary())?;
        self.render_stale_version(out, diff)
    }

    fn render_stale_version(&self, out: &mut impl Write, diff: &ManifestDiff) -> io::Result<()> {
        if diff.stale_version() {
            writeln!(
                out,
                "{} assets changed but the version did not; consumers trusting the version will miss them",
                self.icons().warn
            )?;
        }
        Ok(())
    }

    pub fn render_verify(&self, out: &mut impl Write, result: &VerifyResult) -> io::Result<()> {
        let icons = self.icons();

        for entry in &result.entries {
            match &entry.status {
                EntryStatus::Ok => {
                    if self.verbose > 0 {
                        writeln!(out, "  {} {}", icons.check, entry.url)?;
                    }
                }
                EntryStatus::Mismatch { expected, actual } => {
                    writeln!(out, "  {} {} (hash mismatch)", icons.cross, entry.url)?;
                    writeln!(out, "      expected {}", expected)?;
                    writeln!(out, "      actual   {}", actual)?;
                }
                EntryStatus::Missing => {
                    writeln!(out, "  {} {} (missing)", icons.cross, entry.url)?;
                }
                EntryStatus::Unsupported { algorithm } => {
                    writeln!(
                        out,
                        "  {} {} (cannot compute {})",
                        icons.warn, entry.url, algorithm
                    )?;
                }
            }
        }
        for url in &result.unlisted {
            writeln!(out, "  {} {} (not in manifest)", icons.warn, url)?;
        }

        let failed = result.entries.len() - result.ok_count();
        let icon = if result.is_success() {
            icons.check
        } else {
            icons.cross
        };
        write!(
            out,
            "{} {}/{} assets verified (version {})",
            icon,
            result.ok_count(),
            result.entries.len(),
            result.version
        )?;
        if failed > 0 {
            write!(out, ", {} failed", failed)?;
        }
        if !result.unlisted.is_empty() {
            write!(out, ", {} unlisted", result.unlisted.len())?;
        }
        writeln!(out)
    }

    pub fn render_plan(&self, out: &mut impl Write, result: &PlanResult) -> io::Result<()> {
        let icons = self.icons();
        match result.status {
            PlanStatus::UpToDate => {
                writeln!(
                    out,
                    "{} '{}' is up to date (version {})",
                    icons.check, result.name, result.diff.new_version
                )?;
            }
            PlanStatus::Initial => {
                writeln!(
                    out,
                    "Nothing stored as '{}'; all {} assets are new",
                    result.name,
                    result.diff.added.len()
                )?;
            }
            PlanStatus::Changed | PlanStatus::Unchanged => {
                writeln!(out, "Plan for '{}':", result.name)?;
            }
        }

        if result.status != PlanStatus::UpToDate {
            let fetch: Vec<_> = result.diff.to_fetch().collect();
            let evict: Vec<_> = result.diff.to_evict().collect();
            if !fetch.is_empty() && (self.verbose > 0 || result.status != PlanStatus::Initial) {
                writeln!(out, "  Fetch ({}):", fetch.len())?;
                for url in fetch {
                    writeln!(out, "    {} {}", icons.arrow, url)?;
                }
            }
            if !evict.is_empty() {
                writeln!(out, "  Evict ({}):", evict.len())?;
                for url in evict {
                    writeln!(out, "    - {}", url)?;
                }
            }
            writeln!(out, "Summary: {}", result.diff.summary())?;
            self.render_stale_version(out, &result.diff)?;
        }

        if result.committed {
            writeln!(
                out,
                "{} Stored '{}' at version {}",
                icons.check, result.name, result.diff.new_version
            )?;
        }
        Ok(())
    }

    /// Summary after writing a converted manifest to a file
    pub fn render_convert(&self, out: &mut impl Write, result: &ConvertResult) -> io::Result<()> {
        let icons = self.icons();
        if let Some(path) = &result.written_to {
            writeln!(
                out,
                "{} Wrote {} ({} {} {})",
                icons.check,
                path.display(),
                result.from.as_str(),
                icons.arrow,
                result.to.as_str()
            )?;
        }
        if let Some(previous) = &result.previous_version {
            writeln!(
                out,
                "  version {} {} {}",
                previous, icons.arrow, result.version
            )?;
        }
        Ok(())
    }
}
