//! tailer-cli library - exposes modules for unit tests

pub mod app;
pub mod commands;
pub mod exec;
pub mod signal;
pub mod terminal;
