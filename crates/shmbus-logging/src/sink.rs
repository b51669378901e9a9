//! Log sink trait and the always-available console sink

use shmbus_core::LogRecord;
use std::io::Write;
use thiserror::Error;

/// Failure of a sink to render or persist a record
///
/// Never surfaces to the code that wrote the record; the router counts it and
/// reports it on stderr.
#[derive(Error, Debug)]
#[error("{sink} logger failed to emit record: {source}")]
pub struct SinkError {
    sink: &'static str,
    source: std::io::Error,
}

impl SinkError {
    pub fn new(sink: &'static str, source: std::io::Error) -> Self {
        Self { sink, source }
    }

    pub fn sink(&self) -> &'static str {
        self.sink
    }
}

/// Destination for log records that passed the router's threshold
///
/// Implementations are shared across threads and must keep each record's
/// output contiguous.
pub trait LogSink: Send + Sync {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Emit one record
    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError>;
}

/// Writes rendered records to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for ConsoleSink {
    fn name(&self) -> &'static str {
        "console"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        let mut line = record.render();
        line.push('\n');

        // One write under the stdout lock keeps the line whole
        std::io::stdout()
            .lock()
            .write_all(line.as_bytes())
            .map_err(|e| SinkError::new(self.name(), e))
    }
}
