use serde::Deserialize;

use crate::error::TailerError;
use crate::runner::{TailerOptions, DEFAULT_DASH};
use crate::util::parse_duration;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tailer: TailerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TailerConfig {
    /// Quiet duration, e.g. "1s" or "750ms".
    #[serde(default = "default_after")]
    pub after: String,

    /// Single character repeated to pad separator lines.
    #[serde(default = "default_dash")]
    pub dash: String,

    #[serde(default)]
    pub no_color: bool,
}

fn default_after() -> String {
    "1s".to_string()
}

fn default_dash() -> String {
    DEFAULT_DASH.to_string()
}

impl Default for TailerConfig {
    fn default() -> Self {
        Self {
            after: default_after(),
            dash: default_dash(),
            no_color: false,
        }
    }
}

impl TailerConfig {
    /// Validates the config and builds engine options. Color is only kept
    /// when the output is a terminal.
    pub fn to_options(&self, output_is_terminal: bool) -> Result<TailerOptions, TailerError> {
        validate_dash(&self.dash)?;
        let quiet = parse_duration(&self.after)?;
        Ok(TailerOptions::default()
            .with_quiet(quiet)
            .with_dash(self.dash.clone())
            .with_color(!self.no_color && output_is_terminal))
    }
}

pub fn validate_dash(dash: &str) -> Result<(), TailerError> {
    match dash.chars().count() {
        0 => Err(TailerError::Config("dash char cannot be empty".into())),
        1 => Ok(()),
        _ => Err(TailerError::Config(
            "dash char cannot be longer than 1 character".into(),
        )),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "warn" or "tailer_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

// stdout carries the wrapped program's output; keep stderr quiet by default
fn default_logging_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_match_engine_defaults() {
        let opts = TailerConfig::default().to_options(true).unwrap();
        assert_eq!(opts, TailerOptions::default());
    }

    #[test]
    fn color_needs_a_terminal() {
        let cfg = TailerConfig::default();
        assert!(!cfg.to_options(false).unwrap().color);

        let cfg = TailerConfig {
            no_color: true,
            ..TailerConfig::default()
        };
        assert!(!cfg.to_options(true).unwrap().color);
    }

    #[test]
    fn rejects_bad_dash() {
        assert!(validate_dash("").is_err());
        assert!(validate_dash("==").is_err());
        assert!(validate_dash("─").is_ok());
        assert!(validate_dash("*").is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [tailer]
            after = "250ms"
            "#,
        )
        .unwrap();
        let opts = cfg.tailer.to_options(false).unwrap();
        assert_eq!(opts.quiet, Duration::from_millis(250));
        assert_eq!(opts.dash, DEFAULT_DASH);
        assert_eq!(cfg.logging.level, "warn");
    }
}
