//! Logging Infrastructure
//!
//! File-only tracing setup: the screen owns the terminal, so nothing may be
//! written to stdout/stderr while it runs. Logs go to a daily-rotating file
//! under the log directory instead.

use std::fs;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "STAFFDECK_LOG_DIR";

const DEFAULT_LOG_DIR: &str = "./logs";

/// Initialize the logging system with a daily rotating file.
///
/// `RUST_LOG` controls the filter; the default level is `info`.
pub fn init_logger() -> anyhow::Result<()> {
    let log_dir = std::env::var(LOG_DIR_ENV).unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
    fs::create_dir_all(&log_dir)?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "staffdeck");
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(std::sync::Mutex::new(file_appender));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
