//! Purpose: Aggregate a directory of per-distro JSON files into one JSON array file.
//! Exports: `EntryOrder`, `CompileOptions`, `CompileOutcome`, `CompileFailure`, `FailureKind`,
//! `collect_records`, `render_records`, `write_records`, `compile`.
//! Role: Compilation engine used by the `compile` command; isolates file handling from the CLI.
//! Invariants: Only top-level entries whose name ends in `.json` are considered; no recursion.
//! Invariants: A bad file is reported and skipped, never aborting the run.
//! Invariants: Output is 2-space pretty JSON without a trailing newline, overwritten in place.
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::json::parse::{self, parse_error};

pub const DEFAULT_INPUT_DIR: &str = "data/distros";
pub const DEFAULT_OUTPUT: &str = "data/distributions.json";

const RECORD_EXTENSION: &str = ".json";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum EntryOrder {
    /// Sorted by file name, for output that does not depend on the filesystem.
    #[default]
    Name,
    /// Whatever order the OS lists the directory in.
    Listing,
}

#[derive(Copy, Clone, Debug, Default)]
pub struct CompileOptions {
    pub order: EntryOrder,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct CompileOutcome {
    pub records: usize,
    pub skipped: usize,
    pub written: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FailureKind {
    Decode,
    Read,
    List,
    Write,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Decode => "decode",
            FailureKind::Read => "read",
            FailureKind::List => "list",
            FailureKind::Write => "write",
        }
    }
}

#[derive(Debug)]
pub struct CompileFailure {
    pub kind: FailureKind,
    pub path: PathBuf,
    pub error: Error,
}

/// Parse every `.json` entry of `dir`, skipping (and reporting) the ones that fail.
///
/// Only a failure to list `dir` itself is returned as an error.
pub fn collect_records<N>(
    dir: &Path,
    options: CompileOptions,
    mut on_failure: N,
) -> Result<Vec<Value>, Error>
where
    N: FnMut(CompileFailure),
{
    let mut records = Vec::new();
    for path in record_paths(dir, options.order)? {
        match read_record(&path) {
            Ok(value) => {
                tracing::debug!(path = %path.display(), "parsed record");
                records.push(value);
            }
            Err(error) => {
                let kind = if error.kind() == ErrorKind::Parse {
                    FailureKind::Decode
                } else {
                    FailureKind::Read
                };
                tracing::warn!(path = %path.display(), kind = kind.label(), "skipping record");
                on_failure(CompileFailure { kind, path, error });
            }
        }
    }
    Ok(records)
}

pub fn render_records(records: &[Value]) -> Result<String, Error> {
    serde_json::to_string_pretty(records).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode compiled records")
            .with_source(err)
    })
}

pub fn write_records(records: &[Value], output: &Path) -> Result<(), Error> {
    let rendered = render_records(records)?;
    fs::write(output, rendered).map_err(|err| {
        Error::from_io(
            err,
            format!("failed to write {}", output.display()),
            output,
        )
    })
}

/// Run a full compilation; every failure goes to `on_failure` and the call always returns.
pub fn compile<N>(
    dir: &Path,
    output: &Path,
    options: CompileOptions,
    mut on_failure: N,
) -> CompileOutcome
where
    N: FnMut(CompileFailure),
{
    let mut outcome = CompileOutcome::default();
    let collected = collect_records(dir, options, |failure| {
        outcome.skipped += 1;
        on_failure(failure);
    });
    let records = match collected {
        Ok(records) => records,
        Err(error) => {
            on_failure(CompileFailure {
                kind: FailureKind::List,
                path: dir.to_path_buf(),
                error,
            });
            return outcome;
        }
    };
    outcome.records = records.len();

    match write_records(&records, output) {
        Ok(()) => {
            outcome.written = true;
            tracing::info!(
                output = %output.display(),
                records = outcome.records,
                skipped = outcome.skipped,
                "compiled records"
            );
        }
        Err(error) => on_failure(CompileFailure {
            kind: FailureKind::Write,
            path: output.to_path_buf(),
            error,
        }),
    }
    outcome
}

fn record_paths(dir: &Path, order: EntryOrder) -> Result<Vec<PathBuf>, Error> {
    let list_error =
        |err: std::io::Error| Error::from_io(err, format!("failed to list {}", dir.display()), dir);
    let mut names: Vec<OsString> = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_error)? {
        let name = entry.map_err(list_error)?.file_name();
        if name.to_string_lossy().ends_with(RECORD_EXTENSION) {
            names.push(name);
        }
    }
    if order == EntryOrder::Name {
        names.sort();
    }
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}

fn read_record(path: &Path) -> Result<Value, Error> {
    let text = fs::read_to_string(path).map_err(|err| {
        Error::from_io(err, format!("failed to read {}", path.display()), path)
    })?;
    parse::from_str(&text).map_err(|err| {
        parse_error(
            err,
            format!("error decoding JSON in {}", path.display()),
            "compile.record",
            Some(path),
        )
    })
}
