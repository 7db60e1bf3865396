//! Terminal capability probe injected into the engine.
//!
//! The core never inspects file descriptors itself; whoever owns the output
//! sink decides whether it is an interactive terminal and how wide it is.

/// Width used whenever the sink is not a terminal or the query fails.
pub const DEFAULT_WIDTH: usize = 80;

pub trait TerminalProbe: Send + Sync {
    fn is_terminal(&self) -> bool;

    /// Current column count, `None` when it cannot be determined.
    fn columns(&self) -> Option<u16>;

    fn width(&self) -> usize {
        if !self.is_terminal() {
            return DEFAULT_WIDTH;
        }
        match self.columns() {
            Some(cols) if cols > 0 => usize::from(cols),
            _ => DEFAULT_WIDTH,
        }
    }
}

/// Probe for pipes, files and in-memory sinks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonTerminal;

impl TerminalProbe for NonTerminal {
    fn is_terminal(&self) -> bool {
        false
    }

    fn columns(&self) -> Option<u16> {
        None
    }
}

/// Reports a terminal of a fixed width.
#[derive(Debug, Clone, Copy)]
pub struct FixedWidth(pub u16);

impl TerminalProbe for FixedWidth {
    fn is_terminal(&self) -> bool {
        true
    }

    fn columns(&self) -> Option<u16> {
        Some(self.0)
    }
}
