//! shmbus-logging - Process-wide log router and sinks
//!
//! This crate provides:
//! - [`LogRouter`] the process-wide router every binding initializes once
//! - [`LogSink`] and the builtin sinks selected by cargo features
//!   (`buffer`, `file`, `tracing-sink`, `log-sink`; the console sink is always
//!   present)
//! - [`CallbackAdapter`] for a custom logger installed at most once
//! - [`RouterLayer`] routing this process's `tracing` events into the router

mod callback;
mod external;
mod layer;
mod router;
mod sink;

#[cfg(feature = "buffer")]
mod buffer;
#[cfg(feature = "file")]
mod file;
#[cfg(feature = "log-sink")]
mod facade;

pub use callback::{CallbackAdapter, LogCallbackFn};
pub use external::EXTERNAL_TARGET;
pub use layer::{RouterLayer, init_logging, init_logging_from_env};
pub use router::LogRouter;
pub use shmbus_core::{
    LOG_LEVEL_ENV_VAR, LogError, LogLevel, LogRecord, LogResult, LoggerConfig, SinkKind,
};
pub use sink::{ConsoleSink, LogSink, SinkError};

#[cfg(feature = "buffer")]
pub use buffer::BufferSink;
#[cfg(feature = "tracing-sink")]
pub use external::TracingSink;
#[cfg(feature = "log-sink")]
pub use facade::LogFacadeSink;
#[cfg(feature = "file")]
pub use file::FileSink;

/// Write to the global router
pub fn log(level: LogLevel, origin: Option<&str>, message: &str) {
    LogRouter::global().write(level, origin, message);
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CallbackAdapter, LogLevel, LogRouter, LogSink, LoggerConfig, SinkKind, init_logging, log,
    };
}
