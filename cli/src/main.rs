use clap::Parser;
use tailer_cli::{app, commands::cli, signal};
use tailer_core::config::LoggingConfig;
use tailer_core::error;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static LOG_GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
    std::sync::OnceLock::new();

#[tokio::main]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg =
        tailer_core::config::load_default().map_err(|e| error::CliError::Config(e.to_string()))?;
    init_tracing(&cfg.logging).map_err(error::CliError::Command)?;

    let cancel = CancellationToken::new();
    let _signals = signal::spawn_shutdown_listener(cancel.clone());

    app::run_app(args, &cfg, cancel).await
}

fn exit_code_for_error(e: &error::CliError) -> i32 {
    // 0: success
    // 11: config error
    // 20: spawn / IO error
    // 50: internal/uncategorized
    // 130: interrupted (returned as a normal exit code, not as an error)
    match e {
        error::CliError::Config(_) => 11,
        error::CliError::Tailer(te) => match te {
            error::TailerError::Config(_) => 11,
            error::TailerError::StreamIo { .. } => 20,
            error::TailerError::AlreadyRunning => 50,
        },
        error::CliError::Command(_) => 20,
    }
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), String> {
    if !logging.enabled {
        return Ok(());
    }

    let filter = match std::env::var("RUST_LOG") {
        Ok(v) if !v.trim().is_empty() => EnvFilter::from_default_env(),
        _ => EnvFilter::try_new(logging.level.clone()).map_err(|e| e.to_string())?,
    };

    let mut maybe_writer = None;

    if logging.file {
        let dir = match logging
            .directory
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(d) => std::path::PathBuf::from(d),
            None => std::env::temp_dir().join("tailer"),
        };

        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let file_name = format!("tailer.{}.log", std::process::id());
        let appender = tracing_appender::rolling::never(dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);
        let _ = LOG_GUARD.set(guard);
        maybe_writer = Some(non_blocking);
    }

    if !logging.console && maybe_writer.is_none() {
        return Err("logging disabled for both console and file".to_string());
    }

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    let file_layer = maybe_writer.map(|w| {
        tracing_subscriber::fmt::layer()
            .with_writer(w)
            .with_ansi(false)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn errors_map_to_exit_codes() {
        let config = error::CliError::Config("bad".into());
        let spawn = error::CliError::Command("missing".into());
        let twice = error::CliError::from(error::TailerError::AlreadyRunning);
        let output = error::CliError::from(error::TailerError::StreamIo {
            stream: "output",
            source: std::io::Error::from(std::io::ErrorKind::BrokenPipe),
        });
        assert_eq!(exit_code_for_error(&config), 11);
        assert_eq!(exit_code_for_error(&spawn), 20);
        assert_eq!(exit_code_for_error(&output), 20);
        assert_eq!(exit_code_for_error(&twice), 50);
    }
}
