//! Application logging functionality
//!
//! Sets up the tracing subscriber and manages log files under
//! ~/.config/bezy/logs/

use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    crate::core::config_file::ConfigFile::config_dir().join("logs")
}

/// Name of today's log file
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("bezy-spacing-{}.log", timestamp)
}

/// Get the path to the current log file
pub fn current_log_file() -> PathBuf {
    logs_dir().join(current_log_file_name())
}

/// Initialize the logs directory
pub fn initialize_logs_directory() -> anyhow::Result<()> {
    fs::create_dir_all(logs_dir())?;
    Ok(())
}

/// Filter used when RUST_LOG is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "bezy_spacing=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. With
/// `log_to_file` they are also written to today's file in the logs
/// directory; the returned guard must be held until exit to flush it.
pub fn init(verbose: bool, log_to_file: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    if !log_to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()?;
        return Ok(None);
    }

    initialize_logs_directory()?;
    let appender = tracing_appender::rolling::never(logs_dir(), current_log_file_name());
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(
        "=== bezy-spacing started at {} ===",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    tracing::debug!("Logging to {:?}", current_log_file());
    Ok(Some(guard))
}
