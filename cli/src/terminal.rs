use tailer_core::terminal::TerminalProbe;

/// Probes the process's stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutTerminal;

impl TerminalProbe for StdoutTerminal {
    fn is_terminal(&self) -> bool {
        atty::is(atty::Stream::Stdout)
    }

    fn columns(&self) -> Option<u16> {
        crossterm::terminal::size().ok().map(|(width, _)| width)
    }
}
