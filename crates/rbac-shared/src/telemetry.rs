//! Telemetry setup

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogSettings;
use crate::error::AppError;

fn env_filter(settings: &LogSettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level))
}

/// JSON logs on stderr, for the non-interactive subcommands.
pub fn init_telemetry(settings: &LogSettings) -> Result<(), AppError> {
    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// JSON logs into a daily rolling file, for when the terminal belongs to the TUI.
///
/// The returned guard flushes pending lines on drop; keep it alive for the
/// lifetime of the process.
pub fn init_file_telemetry(settings: &LogSettings) -> Result<WorkerGuard, AppError> {
    fs::create_dir_all(&settings.dir)?;
    let appender = tracing_appender::rolling::daily(&settings.dir, &settings.file_prefix);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(fmt::layer().json().with_ansi(false).with_writer(writer))
        .try_init()
        .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(guard)
}
