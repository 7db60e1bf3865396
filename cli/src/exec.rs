//! `tailer exec`: run a command and feed its merged stdout/stderr to the engine.
use std::io;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, DuplexStream};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use tailer_core::api::{CliError, Engine, RunSummary, StopReason, TailerOptions, TerminalProbe};

use crate::commands::cli::ExecArgs;

/// Splits the program from its arguments. A first argument containing
/// spaces (`tailer exec "ls -la"`) is split on whitespace; any further
/// arguments follow it.
pub fn parse_command(args: &[String]) -> Option<(String, Vec<String>)> {
    let (first, rest) = args.split_first()?;
    if !first.contains(' ') {
        return Some((first.clone(), rest.to_vec()));
    }
    let mut parts = first.split_whitespace().map(str::to_string);
    let program = parts.next()?;
    let mut tail: Vec<String> = parts.collect();
    tail.extend(rest.iter().cloned());
    Some((program, tail))
}

/// Interleaves two readers into one stream in arrival order. The returned
/// stream ends once both readers have reached end of stream.
pub fn merge_output<O, E>(
    mut stdout: O,
    mut stderr: E,
) -> (DuplexStream, JoinHandle<io::Result<()>>)
where
    O: AsyncRead + Unpin + Send + 'static,
    E: AsyncRead + Unpin + Send + 'static,
{
    let (rd, mut wr) = tokio::io::duplex(64 * 1024);
    let task = tokio::spawn(async move {
        let mut out_buf = vec![0u8; 16 * 1024];
        let mut err_buf = vec![0u8; 16 * 1024];
        let mut out_open = true;
        let mut err_open = true;

        while out_open || err_open {
            tokio::select! {
                res = stdout.read(&mut out_buf), if out_open => {
                    let n = res?;
                    if n == 0 {
                        out_open = false;
                    } else {
                        wr.write_all(&out_buf[..n]).await?;
                    }
                }
                res = stderr.read(&mut err_buf), if err_open => {
                    let n = res?;
                    if n == 0 {
                        err_open = false;
                    } else {
                        wr.write_all(&err_buf[..n]).await?;
                    }
                }
            }
        }
        wr.shutdown().await
    });
    (rd, task)
}

/// Runs the command and tails its merged output into `output`. The run
/// ends when the child closes both streams, or on cancellation, in which
/// case the child is killed.
#[tracing::instrument(name = "cli.exec", skip_all, fields(program = tracing::field::Empty))]
pub async fn run_exec<P, W>(
    args: ExecArgs,
    opts: TailerOptions,
    probe: P,
    output: W,
    cancel: CancellationToken,
) -> Result<RunSummary, CliError>
where
    P: TerminalProbe + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let (program, program_args) = parse_command(&args.command)
        .ok_or_else(|| CliError::Config("arguments cannot be empty".into()))?;
    tracing::Span::current().record("program", program.as_str());

    let mut child = Command::new(&program)
        .args(&program_args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CliError::Command(format!("failed to run command: {e}")))?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| CliError::Command("no stdout".into()))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| CliError::Command("no stderr".into()))?;
    let (input, merge_task) = merge_output(stdout, stderr);

    let engine = Engine::new(opts, input, output).with_probe(probe);
    let result = engine.run(cancel).await;
    drop(engine);

    if !matches!(&result, Ok(summary) if summary.reason == StopReason::EndOfInput) {
        let _ = child.start_kill();
    }
    match child.wait().await {
        Ok(status) if !status.success() => {
            tracing::warn!(%status, "failed to run command");
        }
        Ok(_) => {}
        Err(e) => tracing::warn!(error = %e, "failed to wait for command"),
    }
    match merge_task.await {
        Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => {
            tracing::debug!(error = %e, "merging command output failed");
        }
        Err(e) => tracing::debug!(error = %e, "output merge task panicked"),
        _ => {}
    }

    result.map_err(CliError::from)
}
