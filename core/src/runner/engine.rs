use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::sync::CancellationToken;

use crate::error::TailerError;
use crate::terminal::{NonTerminal, TerminalProbe};

use super::io_pump;
use super::monitor::{Monitor, StopSignals};
use super::separator::SeparatorStyle;
use super::sink::SharedSink;
use super::types::{RunSummary, TailerOptions};

type BoxedInput = Box<dyn AsyncRead + Unpin + Send>;

/// Forwards one input stream to one output sink and writes a separator line
/// whenever the input has been quiet for `TailerOptions::quiet`.
///
/// An engine runs once. Share it behind an `Arc` to call [`Engine::close`]
/// from another task while [`Engine::run`] is in progress.
pub struct Engine {
    opts: TailerOptions,
    input: Mutex<Option<BoxedInput>>,
    sink: SharedSink,
    probe: Box<dyn TerminalProbe>,
    started: AtomicBool,
    closed: CancellationToken,
}

impl Engine {
    pub fn new<R, W>(opts: TailerOptions, input: R, output: W) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        Self {
            opts,
            input: Mutex::new(Some(Box::new(input))),
            sink: SharedSink::new(Box::new(output)),
            probe: Box::new(NonTerminal),
            started: AtomicBool::new(false),
            closed: CancellationToken::new(),
        }
    }

    /// Sets how the output's terminal width is discovered. Defaults to
    /// [`NonTerminal`].
    pub fn with_probe(mut self, probe: impl TerminalProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Runs the forwarder and the monitor until the input ends, `cancel`
    /// fires, or [`Engine::close`] is called.
    ///
    /// End of input and cancellation are reported through
    /// [`RunSummary::reason`]; only I/O failures are errors.
    #[tracing::instrument(name = "tailer.run", skip_all, fields(quiet = ?self.opts.quiet))]
    pub async fn run(&self, cancel: CancellationToken) -> Result<RunSummary, TailerError> {
        if self.started.swap(true, Ordering::SeqCst) {
            return Err(TailerError::AlreadyRunning);
        }
        let input = match self.input.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        let Some(input) = input else {
            return Err(TailerError::AlreadyRunning);
        };

        let halt = CancellationToken::new();
        let (activity_tx, activity_rx) = io_pump::activity_channel();
        let style = SeparatorStyle {
            dash: &self.opts.dash,
            color: self.opts.color,
        };
        let monitor = Monitor::new(&self.sink, self.opts.quiet, style, self.probe.as_ref());
        let stop = StopSignals {
            cancel: &cancel,
            closed: &self.closed,
            halt: &halt,
        };

        let (forwarded, monitored) = tokio::join!(
            io_pump::pump(input, &self.sink, activity_tx, &halt),
            monitor.run(activity_rx, stop),
        );

        let bytes_forwarded = forwarded?;
        let outcome = monitored?;
        Ok(RunSummary {
            reason: outcome.reason,
            bytes_forwarded,
            separators: outcome.separators,
        })
    }

    /// Stops a running engine, or makes a future run stop right away.
    /// Safe to call any number of times.
    pub fn close(&self) {
        if !self.closed.is_cancelled() {
            tracing::debug!("close requested");
        }
        self.closed.cancel();
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }
}
