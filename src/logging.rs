//! Logging setup for tidyframe.
//!
//! Events go to the console and to a daily rolling file in the app data
//! directory. `RUST_LOG` overrides the configured level.
//!
//! ```no_run
//! tidyframe::logging::init("info").expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use crate::utils::{APP_NAME, standard_paths};
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Gets the log directory path based on platform conventions
///
/// Returns:
/// - Windows: `%APPDATA%/tidyframe/logs`
/// - macOS: `~/Library/Application Support/tidyframe/logs`
/// - Linux: `~/.local/share/tidyframe/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let log_dir = standard_paths().logs_dir;
    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }
    Ok(log_dir)
}

/// Install the global subscriber: a compact console layer on stderr and a
/// plain-text file layer that rotates daily and keeps ten files.
///
/// # Errors
///
/// Returns error if the log directory cannot be created, the appender fails
/// to build, or `level` is not a valid filter directive.
pub fn init(level: &str) -> Result<()> {
    let log_dir = get_log_dir()?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(10)
        .filename_prefix(APP_NAME)
        .filename_suffix("log")
        .build(&log_dir)
        .context("Failed to create file appender")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_ansi(false)
        .with_writer(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Logging already initialized")?;

    tracing::debug!("Logging initialized, log directory: {}", log_dir.display());
    Ok(())
}
