//! Purpose: Shared launcher for the `extract-json` and `compile-distros` alias binaries.
//! Exports: `CLI_NAME`, `resolve_cli`, `alias_command`, `run_alias`.
//! Role: Lets each alias run `distrokit <subcommand>` with the caller's args.
//! Invariants: A `distrokit` next to the running alias wins over one found on PATH.
//! Invariants: Forwarded args follow the subcommand unchanged; the child's exit code is returned.
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::core::error::{Error, ErrorKind};

pub const CLI_NAME: &str = "distrokit";

/// Path of the CLI inside `exe_dir` when it exists there, else the bare name for a PATH lookup.
pub fn resolve_cli(exe_dir: Option<&Path>) -> PathBuf {
    let file_name = format!("{CLI_NAME}{}", env::consts::EXE_SUFFIX);
    exe_dir
        .map(|dir| dir.join(&file_name))
        .filter(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(CLI_NAME))
}

pub fn alias_command<I>(cli: &Path, subcommand: &str, args: I) -> Command
where
    I: IntoIterator<Item = OsString>,
{
    let mut command = Command::new(cli);
    command.arg(subcommand).args(args);
    command
}

/// Run `distrokit <subcommand>` with this process's args and return the child's exit code.
pub fn run_alias(subcommand: &str) -> Result<i32, Error> {
    let exe = env::current_exe().ok();
    let cli = resolve_cli(exe.as_deref().and_then(Path::parent));
    let status = alias_command(&cli, subcommand, env::args_os().skip(1))
        .status()
        .map_err(|err| {
            Error::new(ErrorKind::Io)
                .with_message(format!("failed to execute {}", cli.display()))
                .with_source(err)
        })?;
    Ok(status.code().unwrap_or(1))
}
