//! CLI assembly: merge flag overrides into the loaded config, build the
//! engine options, and dispatch to stdin mode or exec mode.
use tokio_util::sync::CancellationToken;

use tailer_core::api::{
    self as core_api, CliError, Engine, RunSummary, StopReason, TailerConfig, TerminalProbe,
};

use crate::commands::cli::{Args, Commands};
use crate::exec;
use crate::terminal::StdoutTerminal;

/// Flags win over config file and environment values.
pub fn apply_arg_overrides(args: &Args, mut cfg: TailerConfig) -> TailerConfig {
    if let Some(after) = &args.after {
        cfg.after = after.clone();
    }
    if let Some(dash) = &args.dash {
        cfg.dash = dash.clone();
    }
    if args.no_color {
        cfg.no_color = true;
    }
    cfg
}

#[tracing::instrument(name = "cli.run_app", skip_all)]
pub async fn run_app(
    args: Args,
    cfg: &core_api::AppConfig,
    cancel: CancellationToken,
) -> Result<i32, CliError> {
    let probe = StdoutTerminal;
    let tailer_cfg = apply_arg_overrides(&args, cfg.tailer.clone());
    let opts = tailer_cfg
        .to_options(probe.is_terminal())
        .map_err(|e| CliError::Config(e.to_string()))?;
    tracing::debug!(quiet = ?opts.quiet, dash = %opts.dash, color = opts.color, "options resolved");

    let summary = match args.command {
        Some(Commands::Exec(exec_args)) => {
            exec::run_exec(exec_args, opts, probe, tokio::io::stdout(), cancel).await?
        }
        None => {
            let engine =
                Engine::new(opts, tokio::io::stdin(), tokio::io::stdout()).with_probe(probe);
            engine.run(cancel).await?
        }
    };
    Ok(exit_code_for_summary(&summary))
}

pub fn exit_code_for_summary(summary: &RunSummary) -> i32 {
    tracing::debug!(
        reason = ?summary.reason,
        bytes = summary.bytes_forwarded,
        separators = summary.separators,
        "tailer finished"
    );
    match summary.reason {
        StopReason::Cancelled => 130,
        StopReason::EndOfInput | StopReason::Closed => 0,
    }
}
