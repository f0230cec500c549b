//! Logging setup
//!
//! Human-readable logs go to stderr (stdout carries verdict output), and a
//! JSON copy goes to a daily-rolling file under `logs/`.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directory for log files
pub const LOG_DIR: &str = "logs";

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "karaoke-lock.log";

/// Filter used when `RUST_LOG` is not set
const DEFAULT_FILTER: &str = "karaoke_lock=info";

/// Initialize logging into the default `logs/` directory
///
/// Keep the returned guard alive for the life of the process; dropping it
/// flushes and stops the file writer.
pub fn init_logging() -> Result<WorkerGuard> {
    init_logging_in(LOG_DIR)
}

/// Initialize logging into a custom directory
pub fn init_logging_in(dir: impl AsRef<Path>) -> Result<WorkerGuard> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {:?}", dir))?;

    let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(fmt::layer().json().with_writer(file_writer))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
