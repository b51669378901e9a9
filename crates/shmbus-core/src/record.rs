//! Log records and their rendered form

use crate::LogLevel;
use std::time::SystemTime;

/// A single log event, borrowed from the caller for the duration of a write
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: LogLevel,
    pub origin: Option<&'a str>,
    pub message: &'a str,
    pub timestamp: SystemTime,
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current time
    ///
    /// An empty origin is treated as absent.
    pub fn new(level: LogLevel, origin: Option<&'a str>, message: &'a str) -> Self {
        Self {
            level,
            origin: origin.filter(|o| !o.is_empty()),
            message,
            timestamp: SystemTime::now(),
        }
    }

    /// Render as `[LEVEL] origin: message`, or `[LEVEL]: message` without an origin
    pub fn render(&self) -> String {
        render(self.level, self.origin, self.message)
    }

    pub fn to_owned_record(&self) -> OwnedLogRecord {
        OwnedLogRecord {
            level: self.level,
            origin: self.origin.map(str::to_string),
            message: self.message.to_string(),
            timestamp: self.timestamp,
        }
    }
}

/// A log record that owns its text, for sinks that keep records around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedLogRecord {
    pub level: LogLevel,
    pub origin: Option<String>,
    pub message: String,
    pub timestamp: SystemTime,
}

impl OwnedLogRecord {
    pub fn as_record(&self) -> LogRecord<'_> {
        LogRecord {
            level: self.level,
            origin: self.origin.as_deref(),
            message: &self.message,
            timestamp: self.timestamp,
        }
    }

    pub fn render(&self) -> String {
        render(self.level, self.origin.as_deref(), &self.message)
    }
}

fn render(level: LogLevel, origin: Option<&str>, message: &str) -> String {
    match origin {
        Some(origin) => format!("[{}] {}: {}", level, origin, message),
        None => format!("[{}]: {}", level, message),
    }
}
