use chrono::Local;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Sets up tracing with INFO+ to the console and DEBUG+ from this crate to a
/// timestamped file in `log_dir` (default `logs`).
///
/// The returned guard flushes the file writer when dropped, so keep it alive
/// for the lifetime of the program.
pub fn setup_tracing(log_dir: Option<&Path>) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    let log_dir = log_dir.unwrap_or_else(|| Path::new("logs"));
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S").to_string();

    let file_appender = tracing_appender::rolling::never(log_dir, format!("{}.log", timestamp));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Console layer: INFO and above for all logs. Reports go to stdout, so
    // logs stay on stderr.
    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_level(true)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_filter(EnvFilter::from_default_env().add_directive("INFO".parse()?));

    // File layer: DEBUG and above only for this crate
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_level(true)
        .with_target(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_filter(EnvFilter::from_default_env().add_directive("stocklens=DEBUG".parse()?));

    let subscriber = Registry::default().with(console_layer).with(file_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Tracing initialized. Logs will be written to console and file.");

    Ok(guard)
}
