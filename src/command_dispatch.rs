//! Purpose: Hold top-level CLI command dispatch for `distrokit`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and emission helpers.
//! Invariants: `extract` and `compile` return exit code 0 whatever their inputs hold.
//! Invariants: Only stdout write failures surface as errors from these commands.

use super::*;

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Extract { input } => {
            let text = match extract::read_input(&input) {
                Ok(text) => text,
                Err(err) => {
                    emit_notice(&notice_from_error("extract", "input", &err), color_mode);
                    return Ok(RunOutcome::ok());
                }
            };
            let extracted = extract::extract(&text, |err| {
                let mut notice = notice_from_error("extract", "failed", err);
                notice.path = Some(input.display().to_string());
                emit_notice(&notice, color_mode);
            });
            if let Some(value) = extracted {
                emit_json(&value, color_mode)?;
            }
            Ok(RunOutcome::ok())
        }
        Command::Compile {
            input_dir,
            output,
            order,
            json,
        } => {
            let options = CompileOptions {
                order: order.into(),
            };
            let outcome = compile::compile(&input_dir, &output, options, |failure| {
                emit_compile_failure(&failure, color_mode)
            });

            if json {
                let summary = CompileSummary {
                    output: output.display().to_string(),
                    records: outcome.records,
                    skipped: outcome.skipped,
                    written: outcome.written,
                };
                let value = serde_json::to_value(&summary).map_err(|err| {
                    Error::new(ErrorKind::Internal)
                        .with_message("failed to encode compile summary")
                        .with_source(err)
                })?;
                emit_json(&value, color_mode)?;
            } else if outcome.written {
                emit_line(&format!(
                    "Successfully compiled data to {}",
                    output.display()
                ))?;
            }
            Ok(RunOutcome::ok())
        }
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "distrokit", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
    }
}
