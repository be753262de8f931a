//! Logging Infrastructure
//!
//! Structured logging setup for the POS session core.

use std::path::Path;

/// Error returned when a global subscriber is already installed
pub type LoggerError = Box<dyn std::error::Error + Send + Sync>;

/// Initialize the logger at `info` level on stdout
pub fn init_logger() -> Result<(), LoggerError> {
    init_logger_with_file(None, None)
}

/// Initialize the logger with optional level and file output
///
/// When `log_dir` exists, logs go to a daily rolling file `pos-core.YYYY-MM-DD`
/// inside it; otherwise to stdout.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) -> Result<(), LoggerError> {
    let level = log_level.unwrap_or("info");

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.is_dir() {
            let file_appender = tracing_appender::rolling::daily(log_path, "pos-core");
            return subscriber
                .with_ansi(false)
                .with_writer(file_appender)
                .try_init();
        }
        eprintln!("log dir {} does not exist, logging to stdout", dir);
    }

    subscriber.try_init()
}
