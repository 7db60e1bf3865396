//! Inactivity separator engine.
//!
//! [`runner::Engine`] forwards a byte stream to an output sink and, whenever
//! the stream has been quiet for a configured duration, writes a separator
//! line with the current time and the time elapsed since the previous one.

pub mod api;
pub mod config;
pub mod error;
pub mod runner;
pub mod terminal;
pub mod util;
