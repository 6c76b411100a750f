//! Setup for logging for the reader.

use clap::ValueEnum;
use tracing::{level_filters::LevelFilter, subscriber::SetGlobalDefaultError};
use tracing_subscriber::{fmt::time, FmtSubscriber};

/// All valid logging levels.
#[derive(ValueEnum, Clone, Copy)]
pub(crate) enum LogLevel {
    /// Errors
    Error,
    /// Warnings
    Warn,
    /// Informational Messages
    Info,
    /// Debug messages
    Debug,
    /// Trace messages
    Trace,
}

/// Implements a conversion from LogLevel enum to the tracing::Level.
impl From<LogLevel> for tracing::Level {
    fn from(val: LogLevel) -> Self {
        match val {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

/// Initializes the global subscriber with the following features.
/// - Plain text or JSON format
/// - Display event level
/// - Display event's source code file path and line number
/// - Display time in RFC 3339 format
/// - Maximum verbosity level
pub(crate) fn init(log_level: LogLevel, json: bool) -> Result<(), SetGlobalDefaultError> {
    let builder = FmtSubscriber::builder()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(time::UtcTime::rfc_3339())
        .with_max_level(LevelFilter::from_level(log_level.into()));

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
}
