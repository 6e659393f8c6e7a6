//! Purpose: Pull a fenced JSON document out of a captured response envelope.
//! Exports: `strip_fences`, `raw_data`, `try_extract`, `extract`, `read_input`, `ExtractStage`.
//! Role: Pure extraction core used by the `extract` command; no printing happens here.
//! Invariants: `extract` never fails; every failure is handed to the callback and yields `None`.
//! Invariants: Fence removal is literal and global, ```json first and then ```.
//! Invariants: A missing `rawData` field reads as the empty string.
use std::borrow::Cow;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse::{self, parse_error};

pub const RAW_DATA_FIELD: &str = "rawData";
pub const DEFAULT_INPUT: &str = "curl_output.txt";

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractStage {
    Outer,
    Inner,
}

impl ExtractStage {
    fn context(self) -> &'static str {
        match self {
            ExtractStage::Outer => "extract.envelope",
            ExtractStage::Inner => "extract.raw_data",
        }
    }
}

/// Remove every fence marker, wherever it appears in the string.
pub fn strip_fences(raw: &str) -> String {
    raw.replace(JSON_FENCE, "").replace(FENCE, "")
}

pub fn raw_data(envelope: &Value) -> Result<Cow<'_, str>, Error> {
    let Some(object) = envelope.as_object() else {
        return Err(Error::new(ErrorKind::Shape)
            .with_message(format!(
                "response envelope is {}, expected an object",
                kind_name(envelope)
            ))
            .with_hint(format!(
                "The input must be a JSON object with a `{RAW_DATA_FIELD}` field."
            )));
    };
    match object.get(RAW_DATA_FIELD) {
        None => Ok(Cow::Borrowed("")),
        Some(Value::String(text)) => Ok(Cow::Borrowed(text.as_str())),
        Some(other) => Err(Error::new(ErrorKind::Shape)
            .with_message(format!(
                "`{RAW_DATA_FIELD}` is {}, expected a string",
                kind_name(other)
            ))),
    }
}

pub fn try_extract(text: &str) -> Result<Value, Error> {
    let envelope: Value = decode(text, ExtractStage::Outer)?;
    let raw = raw_data(&envelope)?;
    let cleaned = strip_fences(&raw);
    tracing::debug!(
        raw_len = raw.len(),
        cleaned_len = cleaned.len(),
        "stripped fence markers"
    );
    decode(&cleaned, ExtractStage::Inner)
}

/// Extract the embedded document, reporting any failure through `on_failure`.
pub fn extract<F>(text: &str, mut on_failure: F) -> Option<Value>
where
    F: FnMut(&Error),
{
    match try_extract(text) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(kind = err.kind().label(), "extraction failed");
            on_failure(&err);
            None
        }
    }
}

/// Read the captured response; `-` reads standard input.
pub fn read_input(path: &Path) -> Result<String, Error> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| Error::from_io(err, "failed to read stdin", path))?;
        return Ok(text);
    }
    std::fs::read_to_string(path).map_err(|err| {
        let message = if err.kind() == io::ErrorKind::NotFound {
            format!("{} not found", path.display())
        } else {
            format!("failed to read {}", path.display())
        };
        Error::from_io(err, message, path)
    })
}

fn decode(text: &str, stage: ExtractStage) -> Result<Value, Error> {
    parse::from_str(text).map_err(|err| {
        let message = match stage {
            ExtractStage::Outer => "error decoding response envelope",
            ExtractStage::Inner => "error decoding embedded JSON",
        };
        parse_error(err, message, stage.context(), None)
    })
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
