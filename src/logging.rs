//! Tracing subscriber setup: stdout, optionally mirrored to daily log files.

use std::{env, sync::OnceLock};

use tracing_appender::{
    non_blocking,
    non_blocking::NonBlocking,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    EnvFilter,
    fmt::{fmt, time::ChronoLocal, writer::MakeWriterExt},
};

use crate::error::AppError;

/// Keeps the file writer alive so buffered lines are flushed on shutdown.
static LOG_GUARD: OnceLock<non_blocking::WorkerGuard> = OnceLock::new();

pub fn init() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vreezy=debug,serenity=warn"));
    let json = env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = fmt()
        .with_env_filter(env_filter)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(false)
        .with_ansi(!json)
        .with_level(true);

    match (env::var("LOG_DIR"), json) {
        (Ok(dir), false) => {
            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            builder.with_writer(stdout.and(init_file_writer(&dir)?)).init();
        }
        (Ok(dir), true) => {
            let stdout = std::io::stdout.with_max_level(tracing::Level::INFO);
            builder
                .json()
                .with_writer(stdout.and(init_file_writer(&dir)?))
                .init();
        }
        (Err(_), false) => builder.init(),
        (Err(_), true) => builder.json().init(),
    }

    tracing::info!(json, "📝 Logger initialized");
    Ok(())
}

fn init_file_writer(dir: &str) -> Result<NonBlocking, AppError> {
    let max_files = env::var("LOG_MAX_FILES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok());

    let mut file_builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("vreezy.log");

    if let Some(n) = max_files {
        file_builder = file_builder.max_log_files(n);
    }

    let file_appender = file_builder
        .build(dir)
        .map_err(|e| AppError::Config(format!("failed to create log file in {dir}: {e}")))?;

    let (file_writer, guard) = non_blocking(file_appender);

    LOG_GUARD
        .set(guard)
        .map_err(|_| AppError::Config("logger already initialized".into()))?;

    Ok(file_writer)
}
