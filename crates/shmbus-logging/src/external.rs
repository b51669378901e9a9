//! Sink forwarding records into the `tracing` ecosystem

#[cfg(feature = "tracing-sink")]
use crate::sink::{LogSink, SinkError};
#[cfg(feature = "tracing-sink")]
use shmbus_core::{LogLevel, LogRecord};

/// Target of every event emitted by `TracingSink`
///
/// [`RouterLayer`](crate::RouterLayer) ignores this target so a process using
/// both cannot feed records back into the router.
pub const EXTERNAL_TARGET: &str = "shmbus::external";

/// Re-emits records as `tracing` events for a host's own subscriber
#[cfg(feature = "tracing-sink")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[cfg(feature = "tracing-sink")]
impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "tracing-sink")]
impl LogSink for TracingSink {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let origin = record.origin.unwrap_or_default();
        let message = record.message;

        // tracing has no fatal level
        match record.level {
            LogLevel::Trace => {
                tracing::trace!(target: EXTERNAL_TARGET, origin, "{}", message)
            }
            LogLevel::Debug => {
                tracing::debug!(target: EXTERNAL_TARGET, origin, "{}", message)
            }
            LogLevel::Info => tracing::info!(target: EXTERNAL_TARGET, origin, "{}", message),
            LogLevel::Warning => {
                tracing::warn!(target: EXTERNAL_TARGET, origin, "{}", message)
            }
            LogLevel::Error | LogLevel::Fatal => {
                let fatal = record.level == LogLevel::Fatal;
                tracing::error!(target: EXTERNAL_TARGET, origin, fatal, "{}", message)
            }
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "tracing-sink"))]
#[path = "external/external_tests.rs"]
mod external_tests;
