//! Logging infrastructure for FreeBASIC Compiler GUI.
//!
//! This module provides:
//! - Global `tracing` subscriber setup (stderr + rolling log file)
//! - The append-only log shown in the GUI log pane
//! - Consistent message prefixes for log pane lines
//!
//! # Example
//!
//! ```no_run
//! use fbg_core::logging::{init_tracing_with_file, LogBuffer, LogLevel, MessagePrefix};
//!
//! let _guard = init_tracing_with_file(LogLevel::Info, ".logs");
//!
//! let mut log = LogBuffer::new(true);
//! log.push(MessagePrefix::Phase, "Compile");
//! log.push(MessagePrefix::Command, "fbc -s console -x hello.exe hello.bas");
//! ```

mod buffer;
mod types;

pub use buffer::{LogBuffer, LogEntry};
pub use types::{LogLevel, MessagePrefix};

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prefix of the rolling application log files.
const LOG_FILE_PREFIX: &str = "freebasic-compiler-gui.log";

/// Initialize global tracing subscriber for application-wide logging.
///
/// Respects `RUST_LOG`, falls back to `default_level`, writes to stderr.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Initialize tracing with both stderr and a daily-rolling file in `logs_dir`.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the application. Falls back to stderr-only logging
/// when the directory cannot be created.
pub fn init_tracing_with_file(
    default_level: LogLevel,
    logs_dir: impl AsRef<Path>,
) -> Option<WorkerGuard> {
    let logs_dir = logs_dir.as_ref();
    if let Err(e) = std::fs::create_dir_all(logs_dir) {
        init_tracing(default_level);
        tracing::warn!(
            "Cannot create logs folder {}: {}; logging to stderr only",
            logs_dir.display(),
            e
        );
        return None;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_filter_str()));

    let appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
