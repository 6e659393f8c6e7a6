//! Purpose: Provide the runtime JSON decode entrypoints and parse-failure mapping.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`, `parse_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category labels are stable; hints never echo the payload.
//! Notes: Callsites pick the message so domain context stays explicit.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::core::error::{Error, ErrorKind};

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Io => ParseFailureCategory::Io,
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    format!(
        "parse category: {}; line {}, column {}; context: {context}",
        categorize_error(err).label(),
        err.line(),
        err.column()
    )
}

/// Wrap a decode failure as a `Parse` error carrying a category hint.
pub fn parse_error(
    err: serde_json::Error,
    message: impl Into<String>,
    context: &str,
    path: Option<&Path>,
) -> Error {
    let hint = hint_for_error(&err, context);
    let mut wrapped = Error::new(ErrorKind::Parse)
        .with_message(message)
        .with_hint(hint);
    if let Some(path) = path {
        wrapped = wrapped.with_path(path);
    }
    wrapped.with_source(err)
}
