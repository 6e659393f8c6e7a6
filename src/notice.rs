//! Purpose: Define a stable, structured schema for non-fatal stderr diagnostics.
//! Exports: `Notice`, `notice_json`, `notice_from_error`, `notice_time_now`.
//! Role: Shared contract helper for reporting skipped files and failed extractions.
//! Invariants: Notices are non-fatal and never alter stdout payloads.
//! Invariants: JSON schema is additive-only: `{"notice": {kind, time, cmd, path, message, details}}`.
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value, json};
use time::format_description::well_known::Rfc3339;

use crate::core::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: String,
    pub time: String,
    pub cmd: String,
    pub path: Option<String>,
    pub message: String,
    pub details: Map<String, Value>,
}

pub fn notice_json(notice: &Notice) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(notice.kind));
    inner.insert("time".to_string(), json!(notice.time));
    inner.insert("cmd".to_string(), json!(notice.cmd));
    if let Some(path) = &notice.path {
        inner.insert("path".to_string(), json!(path));
    }
    inner.insert("message".to_string(), json!(notice.message));
    inner.insert("details".to_string(), Value::Object(notice.details.clone()));

    let mut outer = Map::new();
    outer.insert("notice".to_string(), Value::Object(inner));
    Value::Object(outer)
}

/// Build a notice for `cmd` from a reported error.
pub fn notice_from_error(cmd: &str, kind: &str, err: &Error) -> Notice {
    let mut details = Map::new();
    details.insert("error_kind".to_string(), json!(err.kind().label()));
    if let Some(hint) = err.hint() {
        details.insert("hint".to_string(), json!(hint));
    }
    Notice {
        kind: kind.to_string(),
        time: notice_time_now().unwrap_or_default(),
        cmd: cmd.to_string(),
        path: err.path().map(|path| path.display().to_string()),
        message: err.describe(),
        details,
    }
}

pub fn notice_time_now() -> Option<String> {
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}
