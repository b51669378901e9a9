//! shmbus-core - Log levels, records, errors and level resolution
//!
//! This crate provides the foundational types of the shmbus logging subsystem:
//! - [`LogLevel`] the ordered six-level severity scale
//! - [`LogRecord`] a single log event and its rendered form
//! - [`LogError`] for configuration and installation failures
//! - [`resolve`] and [`LoggerConfig`] for deciding the effective log level and sink

mod config;
mod error;
mod record;

pub use config::{
    LOG_LEVEL_ENV_VAR, LoggerConfig, SinkKind, read_env_level, resolve, resolve_or,
};
pub use error::{LogError, LogResult};
pub use record::{LogRecord, OwnedLogRecord};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Severity of a log record
///
/// The discriminant is the value carried across the C ABI.
#[repr(u8)]
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl LogLevel {
    /// All levels, least severe first
    pub const ALL: [LogLevel; 6] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
        LogLevel::Fatal,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LogLevel::Trace),
            1 => Some(LogLevel::Debug),
            2 => Some(LogLevel::Info),
            3 => Some(LogLevel::Warning),
            4 => Some(LogLevel::Error),
            5 => Some(LogLevel::Fatal),
            _ => None,
        }
    }

    /// Upper-case name used when rendering records
    pub const fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Case-insensitive; `warn` is accepted as an alias of `warning`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warning" | "warn" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(LogError::InvalidLevel(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = LogError;

    fn try_from(value: String) -> Result<Self, LogError> {
        value.parse()
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        LogError, LogLevel, LogRecord, LogResult, LoggerConfig, OwnedLogRecord, SinkKind,
        resolve,
    };
}

#[cfg(test)]
mod lib_tests;
