//! Custom logger callback adapter

use crate::sink::{LogSink, SinkError};
use shmbus_core::{LogError, LogLevel, LogRecord, LogResult};
use std::fmt;
use std::sync::Arc;

/// Signature of a custom logger: level, optional origin, message
pub type LogCallbackFn = dyn Fn(LogLevel, Option<&str>, &str) + Send + Sync;

/// A user-supplied logger callback
///
/// The adapter holds a strong reference to the callback. Once installed with
/// [`LogRouter::install_callback`](crate::LogRouter::install_callback) the
/// router keeps the adapter for the rest of its life, so the callback stays
/// valid for every later log call no matter which thread makes it.
///
/// The adapter is not a [`LogSink`] itself: the only way to make it the active
/// sink is `install_callback`, which accepts one callback per router.
#[derive(Clone)]
pub struct CallbackAdapter {
    callback: Arc<LogCallbackFn>,
}

impl CallbackAdapter {
    /// Wrap a Rust closure
    pub fn from_fn<F>(callback: F) -> Self
    where
        F: Fn(LogLevel, Option<&str>, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback that may be missing, as it can be when it comes from a
    /// host language
    pub fn from_option<F>(callback: Option<F>) -> LogResult<Self>
    where
        F: Fn(LogLevel, Option<&str>, &str) + Send + Sync + 'static,
    {
        callback.map(Self::from_fn).ok_or(LogError::NullCallback)
    }

    /// Wrap an already shared callback
    pub fn from_arc(callback: Arc<LogCallbackFn>) -> Self {
        Self { callback }
    }

    /// Invoke the callback directly, bypassing any threshold
    pub fn call(&self, level: LogLevel, origin: Option<&str>, message: &str) {
        (self.callback)(level, origin, message);
    }
}

impl fmt::Debug for CallbackAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackAdapter")
            .field("strong_count", &Arc::strong_count(&self.callback))
            .finish()
    }
}

/// Active-sink form of the callback installed in a router
pub(crate) struct CallbackSink(pub(crate) Arc<CallbackAdapter>);

impl LogSink for CallbackSink {
    fn name(&self) -> &'static str {
        "callback"
    }

    fn emit(&self, record: &LogRecord<'_>) -> Result<(), SinkError> {
        self.0.call(record.level, record.origin, record.message);
        Ok(())
    }
}
