//! NDJSON output for `--json`
//!
//! One JSON object per line, each with an `event` field. Commands emit a
//! `start` event, any number of data events, then `complete` (or `error`).

use std::io::{self, Write};

use serde::Serialize;

use crate::application::EntryVerification;
use crate::domain::services::{AssetChange, Violation};

/// Write a single event as one line
pub fn write_event<W: Write, T: Serialize>(out: &mut W, event: &T) -> io::Result<()> {
    let line =
        serde_json::to_string(event).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Write a typed event to stdout
pub fn emit_event<T: Serialize>(event: &T) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_event(&mut out, event)
}

/// Event emitted when a command starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub version: &'static str,
}

impl<'a> StartEvent<'a> {
    pub fn new(command: &'a str) -> Self {
        Self {
            event: "start",
            command,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Event emitted when a command finishes.
#[derive(Debug, Clone, Serialize)]
pub struct CompleteEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub success: bool,
    /// Command-specific summary fields, flattened into the event
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub summary: Option<serde_json::Value>,
}

impl<'a> CompleteEvent<'a> {
    pub fn new(command: &'a str, success: bool) -> Self {
        Self {
            event: "complete",
            command,
            success,
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: serde_json::Value) -> Self {
        self.summary = Some(summary);
        self
    }
}

/// Event emitted when a command fails outright.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub message: String,
}

impl<'a> ErrorEvent<'a> {
    pub fn new(command: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "error",
            command,
            message: message.into(),
        }
    }
}

/// Non-fatal notice (unknown fields, config warnings).
#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub message: String,
}

impl<'a> WarningEvent<'a> {
    pub fn new(command: &'a str, message: impl Into<String>) -> Self {
        Self {
            event: "warning",
            command,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ViolationEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    #[serde(flatten)]
    pub violation: &'a Violation,
}

impl<'a> ViolationEvent<'a> {
    pub fn new(command: &'a str, violation: &'a Violation) -> Self {
        Self {
            event: "violation",
            command,
            violation,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChangeEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    #[serde(flatten)]
    pub change: &'a AssetChange,
}

impl<'a> ChangeEvent<'a> {
    pub fn new(command: &'a str, change: &'a AssetChange) -> Self {
        Self {
            event: "change",
            command,
            change,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EntryEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    #[serde(flatten)]
    pub entry: &'a EntryVerification,
}

impl<'a> EntryEvent<'a> {
    pub fn new(command: &'a str, entry: &'a EntryVerification) -> Self {
        Self {
            event: "entry",
            command,
            entry,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UnlistedEvent<'a> {
    pub event: &'static str,
    pub command: &'a str,
    pub url: &'a str,
}

impl<'a> UnlistedEvent<'a> {
    pub fn new(command: &'a str, url: &'a str) -> Self {
        Self {
            event: "unlisted",
            command,
            url,
        }
    }
}
