use std::time::Duration;

pub const DEFAULT_QUIET: Duration = Duration::from_secs(1);
pub const DEFAULT_DASH: &str = "━";

/// Engine configuration. Validation happens in the config layer before an
/// engine is built, so every field here is taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailerOptions {
    /// How long the input must stay silent before a separator is written.
    pub quiet: Duration,
    /// Repeated to pad the separator line to the terminal width.
    pub dash: String,
    pub color: bool,
}

impl Default for TailerOptions {
    fn default() -> Self {
        Self {
            quiet: DEFAULT_QUIET,
            dash: DEFAULT_DASH.to_string(),
            color: true,
        }
    }
}

impl TailerOptions {
    pub fn with_quiet(mut self, quiet: Duration) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_dash(mut self, dash: impl Into<String>) -> Self {
        self.dash = dash.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The input reached end of stream.
    EndOfInput,
    /// The caller's cancellation token fired.
    Cancelled,
    /// `Engine::close` was called.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub reason: StopReason,
    pub bytes_forwarded: u64,
    pub separators: u64,
}
