//! Sink forwarding records to the `log` facade

use crate::external::EXTERNAL_TARGET;
use crate::sink::{LogSink, SinkError};
use shmbus_core::{LogLevel, LogRecord};
use std::fmt;

/// Hands records to whatever logger the host registered with `log::set_logger`
///
/// Records go out under [`EXTERNAL_TARGET`] with the origin prefixed to the
/// message, so a `log`-to-`tracing` bridge cannot feed them back into the
/// router. Records above `log::max_level()` are skipped, as the `log` macros
/// do.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacadeSink;

impl LogFacadeSink {
    pub fn new() -> Self {
        Self
    }

    /// `log` has no fatal level
    fn convert_level(level: LogLevel) -> log::Level {
        match level {
            LogLevel::Trace => log::Level::Trace,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Error | LogLevel::Fatal => log::Level::Error,
        }
    }
}

impl LogSink for LogFacadeSink {
    fn name(&self) -> &'static str {
        "log"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let level = Self::convert_level(record.level);
        if level > log::max_level() {
            return Ok(());
        }

        let logger = log::logger();
        let forward = |args: fmt::Arguments<'_>| {
            logger.log(
                &log::Record::builder()
                    .args(args)
                    .level(level)
                    .target(EXTERNAL_TARGET)
                    .build(),
            )
        };
        match record.origin {
            Some(origin) => forward(format_args!("{}: {}", origin, record.message)),
            None => forward(format_args!("{}", record.message)),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "facade/facade_tests.rs"]
mod facade_tests;
