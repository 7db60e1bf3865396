//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `tailer_core::api` instead of reaching into internal modules.

pub use crate::config::{load_default, AppConfig, LoggingConfig, TailerConfig};
pub use crate::error::{CliError, TailerError};
pub use crate::runner::{
    render_separator, Engine, RunSummary, SeparatorStyle, StopReason, TailerOptions, DEFAULT_DASH,
    DEFAULT_QUIET,
};
pub use crate::terminal::{FixedWidth, NonTerminal, TerminalProbe, DEFAULT_WIDTH};
pub use crate::util::parse_duration;
