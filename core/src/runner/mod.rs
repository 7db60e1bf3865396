mod engine;
mod io_pump;
mod monitor;
mod separator;
mod sink;
mod timer;
pub mod types;

pub use engine::Engine;
pub use separator::{render_separator, SeparatorStyle};
pub use sink::SharedSink;
pub use types::{RunSummary, StopReason, TailerOptions, DEFAULT_DASH, DEFAULT_QUIET};
