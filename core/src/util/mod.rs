pub mod time;

pub use time::{format_elapsed, parse_duration, truncate_to};
