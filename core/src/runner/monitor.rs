//! Quiet-period monitor: owns the timer and writes separator lines.
use std::time::Duration;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::error::TailerError;
use crate::terminal::TerminalProbe;
use crate::util::truncate_to;

use super::separator::{render_separator, SeparatorStyle};
use super::sink::SharedSink;
use super::timer::QuietTimer;
use super::types::StopReason;

const ELAPSED_RESOLUTION: Duration = Duration::from_millis(100);

pub(crate) struct Monitor<'a> {
    sink: &'a SharedSink,
    timer: QuietTimer,
    baseline: Instant,
    style: SeparatorStyle<'a>,
    probe: &'a dyn TerminalProbe,
    separators: u64,
}

pub(crate) struct MonitorOutcome {
    pub reason: StopReason,
    pub separators: u64,
}

/// Stop sources the monitor watches, in priority order.
pub(crate) struct StopSignals<'a> {
    pub cancel: &'a CancellationToken,
    pub closed: &'a CancellationToken,
    /// Cancelled by the monitor on exit so the forwarder stops too.
    pub halt: &'a CancellationToken,
}

impl<'a> Monitor<'a> {
    pub(crate) fn new(
        sink: &'a SharedSink,
        quiet: Duration,
        style: SeparatorStyle<'a>,
        probe: &'a dyn TerminalProbe,
    ) -> Self {
        Self {
            sink,
            timer: QuietTimer::new(quiet),
            baseline: Instant::now(),
            style,
            probe,
            separators: 0,
        }
    }

    pub(crate) async fn run(
        mut self,
        mut activity: mpsc::Receiver<()>,
        stop: StopSignals<'_>,
    ) -> Result<MonitorOutcome, TailerError> {
        let result = loop {
            tokio::select! {
                biased;
                _ = stop.cancel.cancelled() => break Ok(StopReason::Cancelled),
                _ = stop.closed.cancelled() => break Ok(StopReason::Closed),
                signal = activity.recv() => match signal {
                    Some(()) => self.timer.restart(),
                    None => break Ok(StopReason::EndOfInput),
                },
                _ = self.timer.elapsed() => {
                    if let Err(e) = self.emit(&stop).await {
                        break Err(e);
                    }
                }
            }
        };

        if self.timer.stop() {
            tracing::trace!("quiet timer stopped while counting down");
        }
        stop.halt.cancel();
        if let Err(e) = self.sink.close().await {
            tracing::debug!(error = %e, "closing output failed");
        }

        let reason = result?;
        tracing::debug!(?reason, separators = self.separators, "monitor stopped");
        Ok(MonitorOutcome {
            reason,
            separators: self.separators,
        })
    }

    async fn emit(&mut self, stop: &StopSignals<'_>) -> Result<(), TailerError> {
        let now = Instant::now();
        let elapsed = truncate_to(
            now.saturating_duration_since(self.baseline),
            ELAPSED_RESOLUTION,
        );
        let line = render_separator(&Local::now(), elapsed, self.style, self.probe.width());

        tokio::select! {
            biased;
            _ = stop.cancel.cancelled() => return Ok(()),
            _ = stop.closed.cancelled() => return Ok(()),
            res = self.sink.write_all(line.as_bytes()) => res.map_err(TailerError::output)?,
        }

        self.baseline = now;
        self.separators += 1;
        tracing::trace!(?elapsed, "separator written");
        Ok(())
    }
}
