//! Purpose: `distrokit` CLI entry point.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: stdout carries only pretty JSON or the compile success line.
//! Invariants: Per-file and per-extraction failures are notices on stderr and never change the exit code.
//! Invariants: CLI-level errors exit with `to_exit_code`; they print as text on a TTY and JSON otherwise.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind,
};
use clap_complete::aot::Shell;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

mod color_json;
mod command_dispatch;

use color_json::render_json;
use distrokit::compile::{self, CompileFailure, CompileOptions, EntryOrder};
use distrokit::core::error::{Error, ErrorKind, to_exit_code};
use distrokit::extract;
use distrokit::notice::{Notice, notice_from_error, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    command_dispatch::dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

const DEFAULT_LOG_FILTER: &str = "error";

fn init_tracing() {
    // Notices already cover user-facing failures; tracing stays quiet unless RUST_LOG asks.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

#[derive(Parser)]
#[command(
    name = "distrokit",
    version,
    about = "Extract fenced JSON from captured responses and compile distro JSON files",
    long_about = None,
    after_help = r#"EXAMPLES
  $ distrokit extract                       # reads ./curl_output.txt
  $ curl -s "$URL" | distrokit extract --input -
  $ distrokit compile                       # data/distros/*.json -> data/distributions.json
  $ distrokit compile --input-dir distros --output all.json --json

LOGGING
  Set RUST_LOG (e.g. RUST_LOG=debug) to trace per-file processing on stderr."#,
    arg_required_else_help = true
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        global = true,
        help = "Colorize JSON on stdout and labels on stderr"
    )]
    color: ColorMode,
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OrderCli {
    Name,
    Listing,
}

impl From<OrderCli> for EntryOrder {
    fn from(order: OrderCli) -> Self {
        match order {
            OrderCli::Name => EntryOrder::Name,
            OrderCli::Listing => EntryOrder::Listing,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    #[command(
        about = "Print the JSON document embedded in a captured response",
        long_about = r#"Read a captured response envelope, take its `rawData` string,
strip every ```json and ``` marker from it, parse the rest as JSON and print it
indented by two spaces.

Failures are reported on stderr and leave stdout empty; the exit code stays 0."#
    )]
    Extract {
        #[arg(
            long,
            short = 'i',
            default_value = extract::DEFAULT_INPUT,
            value_hint = ValueHint::FilePath,
            help = "Captured response file (`-` for stdin)"
        )]
        input: PathBuf,
    },
    #[command(
        about = "Compile every distro JSON file into one array",
        long_about = r#"Parse each `*.json` entry of the input directory (no recursion) and write
all parsed values as one JSON array, indented by two spaces, to the output file.

Unreadable or malformed files are reported on stderr and skipped."#
    )]
    Compile {
        #[arg(
            long,
            default_value = compile::DEFAULT_INPUT_DIR,
            value_hint = ValueHint::DirPath,
            help = "Directory holding one JSON file per distro"
        )]
        input_dir: PathBuf,
        #[arg(
            long,
            short = 'o',
            default_value = compile::DEFAULT_OUTPUT,
            value_hint = ValueHint::FilePath,
            help = "Output file, overwritten on success"
        )]
        output: PathBuf,
        #[arg(
            long,
            value_enum,
            default_value = "name",
            help = "Record order: sorted by file name, or raw directory listing order"
        )]
        order: OrderCli,
        #[arg(long, help = "Print a JSON summary instead of the success line")]
        json: bool,
    },
    #[command(
        arg_required_else_help = true,
        about = "Generate shell completions",
        after_help = r#"EXAMPLES
  $ distrokit completion bash > ~/.local/share/bash-completion/completions/distrokit
  $ distrokit completion zsh > ~/.zfunc/_distrokit"#
    )]
    Completion {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Debug, Serialize)]
struct CompileSummary {
    output: String,
    records: usize,
    skipped: usize,
    written: bool,
}

fn stdout_error(err: io::Error) -> Error {
    Error::new(ErrorKind::Io)
        .with_message("failed to write stdout")
        .with_source(err)
}

fn emit_json(value: &Value, color_mode: ColorMode) -> Result<(), Error> {
    let use_color = color_mode.use_color(io::stdout().is_terminal());
    let rendered = render_json(value, use_color);
    writeln!(io::stdout().lock(), "{rendered}").map_err(stdout_error)
}

fn emit_line(line: &str) -> Result<(), Error> {
    writeln!(io::stdout().lock(), "{line}").map_err(stdout_error)
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        let label = colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow);
        eprintln!("{label} {}", notice.message);
        if let Some(hint) = notice.details.get("hint").and_then(Value::as_str) {
            let label = colorize_label("hint:", color_mode.use_color(is_tty), AnsiColor::Yellow);
            eprintln!("{label} {hint}");
        }
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"notice\":{\"kind\":\"internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn emit_compile_failure(failure: &CompileFailure, color_mode: ColorMode) {
    let mut notice = notice_from_error("compile", failure.kind.label(), &failure.error);
    notice.path = Some(failure.path.display().to_string());
    emit_notice(&notice, color_mode);
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let json = serde_json::to_string(&error_json(err)).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::NotFound => "not found".to_string(),
        ErrorKind::Permission => "permission denied".to_string(),
        ErrorKind::Parse => "invalid json".to_string(),
        ErrorKind::Shape => "unexpected json shape".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = vec![format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    )];
    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }
    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let subcommand = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .and_then(|usage| {
            let mut tokens = usage.split_whitespace().skip_while(|t| *t != "distrokit");
            tokens.next()?;
            tokens.next().filter(|t| !t.starts_with(['-', '<', '[']))
        });
    match subcommand {
        Some(name) => format!("Try `distrokit {name} --help`."),
        None => "Try `distrokit --help`.".to_string(),
    }
}
