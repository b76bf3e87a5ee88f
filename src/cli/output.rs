//! Result printing
//!
//! JSON output wraps lists and single resources in a `data` envelope, the
//! same shape the API answers with. Plain output prints one tab-separated
//! `id` / label line per resource.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Nested id keys, most specific first
const ID_KEYS: &[&str] = &[
    "record_id",
    "entry_id",
    "note_id",
    "task_id",
    "comment_id",
    "thread_id",
    "webhook_id",
    "workspace_member_id",
    "call_recording_id",
    "meeting_id",
    "option_id",
    "status_id",
    "attribute_id",
    "object_id",
    "list_id",
];

const LABEL_KEYS: &[&str] = &[
    "api_slug",
    "title",
    "name",
    "email_address",
    "target_url",
    "content_plaintext",
    "speaker_name",
];

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_flags(json: bool, plain: bool) -> Result<Self> {
        match (json, plain) {
            (true, true) => Err(Error::usage(
                "invalid output mode (cannot combine --json and --plain)",
            )),
            (_, true) => Ok(Self::Plain),
            _ => Ok(Self::Json),
        }
    }
}

/// Writes command results to a sink
pub struct Printer<W> {
    out: W,
    mode: OutputMode,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, mode: OutputMode) -> Self {
        Self { out, mode }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// A page or a full collection
    pub fn items(&mut self, items: &[JsonObject]) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.json(&json!({ "data": items })),
            OutputMode::Plain => items.iter().try_for_each(|item| self.plain_line(item)),
        }
    }

    /// One cursor page; the next cursor is kept so the caller can resume
    pub fn cursor_page(&mut self, items: &[JsonObject], next_cursor: &str) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.json(&json!({
                "data": items,
                "pagination": { "next_cursor": (!next_cursor.is_empty()).then_some(next_cursor) },
            })),
            OutputMode::Plain => {
                self.items(items)?;
                if !next_cursor.is_empty() {
                    writeln!(self.out, "# next_cursor\t{next_cursor}")?;
                }
                Ok(())
            }
        }
    }

    /// A single resource
    pub fn object(&mut self, item: &JsonObject) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.json(&json!({ "data": item })),
            OutputMode::Plain => self.plain_line(item),
        }
    }

    /// Any other serializable value; plain mode prints top-level scalars
    pub fn value<S: Serialize>(&mut self, value: &S) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.json(value),
            OutputMode::Plain => {
                let value = serde_json::to_value(value)?;
                match value {
                    JsonValue::Object(map) => {
                        for (key, v) in &map {
                            if let Some(text) = scalar_text(v) {
                                writeln!(self.out, "{key}\t{text}")?;
                            }
                        }
                        Ok(())
                    }
                    other => {
                        writeln!(self.out, "{}", scalar_text(&other).unwrap_or_default())?;
                        Ok(())
                    }
                }
            }
        }
    }

    /// Acknowledge a deletion
    pub fn deleted(&mut self, id: &str) -> Result<()> {
        match self.mode {
            OutputMode::Json => self.json(&json!({ "deleted": true, "id": id })),
            OutputMode::Plain => {
                writeln!(self.out, "deleted\t{id}")?;
                Ok(())
            }
        }
    }

    /// A bare line regardless of mode
    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.out, "{text}")?;
        Ok(())
    }

    fn json<S: Serialize + ?Sized>(&mut self, value: &S) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, value)?;
        writeln!(self.out)?;
        Ok(())
    }

    fn plain_line(&mut self, item: &JsonObject) -> Result<()> {
        let id = resource_id(item);
        match resource_label(item) {
            Some(label) => writeln!(self.out, "{id}\t{label}")?,
            None => writeln!(self.out, "{id}")?,
        }
        Ok(())
    }
}

/// Most specific id of a resource, e.g. `record_id` from `{"id": {...}}`
pub fn resource_id(item: &JsonObject) -> String {
    match item.get("id") {
        Some(JsonValue::Object(id)) => ID_KEYS
            .iter()
            .find_map(|key| id.get(*key).and_then(JsonValue::as_str))
            .unwrap_or_default()
            .to_string(),
        Some(other) => scalar_text(other).unwrap_or_default(),
        None => String::new(),
    }
}

fn resource_label(item: &JsonObject) -> Option<String> {
    LABEL_KEYS
        .iter()
        .filter_map(|key| item.get(*key))
        .find_map(|v| scalar_text(v).filter(|s| !s.is_empty()))
        .map(|s| s.replace(['\t', '\n'], " "))
}

fn scalar_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
